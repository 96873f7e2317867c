use kpi_compare::Comparison;
use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};

pub struct KpiMetrics {
    registry: Registry,
    pub kpi_baseline_value: GaugeVec,
    pub kpi_scenario_value: GaugeVec,
    pub kpi_change_percent: GaugeVec,
    pub lever_setting: GaugeVec,
}

fn gauge_vec(registry: &Registry, name: &str, help: &str, labels: &[&str]) -> prometheus::Result<GaugeVec> {
    let gauge = GaugeVec::new(Opts::new(name, help), labels)?;
    registry.register(Box::new(gauge.clone()))?;
    Ok(gauge)
}

fn set_or_clear(gauges: &GaugeVec, labels: &[&str], value: Option<f64>) {
    match value {
        Some(v) => gauges.with_label_values(labels).set(v),
        // absent when the series was never set
        None => {
            let _ = gauges.remove_label_values(labels);
        }
    }
}

impl KpiMetrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let kpi_baseline_value = gauge_vec(
            &registry,
            "kpi_baseline_value",
            "KPI headline value for the reference lever setting",
            &["kpi", "model"],
        )?;

        let kpi_scenario_value = gauge_vec(
            &registry,
            "kpi_scenario_value",
            "KPI headline value for the current lever setting",
            &["kpi", "model"],
        )?;

        let kpi_change_percent = gauge_vec(
            &registry,
            "kpi_change_percent",
            "Scenario change relative to baseline, percent",
            &["kpi", "model"],
        )?;

        let lever_setting = gauge_vec(
            &registry,
            "lever_setting",
            "Current lever slider position",
            &["lever"],
        )?;

        Ok(Self {
            registry,
            kpi_baseline_value,
            kpi_scenario_value,
            kpi_change_percent,
            lever_setting,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Records every defined cell of a comparison. A failed KPI or an
    /// undefined percentage drops its series so no stale value is exported.
    pub fn observe(&self, comparison: &Comparison) {
        let model = comparison.model.name();
        for (lever, value) in comparison.inputs.iter() {
            self.lever_setting
                .with_label_values(&[lever.name()])
                .set(value);
        }
        for row in comparison.rows() {
            let labels = [row.kpi.name(), model];
            set_or_clear(&self.kpi_baseline_value, &labels, row.baseline.ok());
            set_or_clear(&self.kpi_scenario_value, &labels, row.scenario.ok());
            set_or_clear(&self.kpi_change_percent, &labels, row.change_percent);
        }
    }

    /// Prometheus text exposition of everything recorded so far.
    pub fn encode_text(&self) -> prometheus::Result<String> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
