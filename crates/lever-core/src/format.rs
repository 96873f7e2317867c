use crate::kpi::{KpiId, ModelKind};

/// Headline value with the unit shown on the KPI summary cards.
pub fn display_value(model: ModelKind, kpi: KpiId, value: f64) -> String {
    match (model, kpi) {
        (ModelKind::Trajectory, KpiId::EmissionsPerUnit) => format!("{value:.2} kg/unit"),
        (ModelKind::Trajectory, KpiId::CircularityIndex) => format!("{:.1} %", value * 100.0),
        (ModelKind::Trajectory, KpiId::EnergyCostPerUnit) => {
            format!("{} FCFA", group_thousands(value.round()))
        }
        (ModelKind::Trajectory, KpiId::ProfitMargin) => format!("{:.2} %", value * 100.0),
        (_, KpiId::Co2Emissions) => format!("{value:.2} t CO₂e"),
        (ModelKind::Lever, KpiId::CircularityIndex) => format!("{value:.2} %"),
        (_, KpiId::GreenOpex) => format!("{value:.2} M"),
        _ => format!("{value:.2}"),
    }
}

/// `1234567.0` -> `1,234,567`. Fractions are dropped.
pub fn group_thousands(value: f64) -> String {
    let negative = value < 0.0;
    let digits = format!("{:.0}", value.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if negative && out.chars().any(|c| c != '0' && c != ',') {
        out.insert(0, '-');
    }
    out
}

/// Signed percentage with one decimal, `+0.0%` style.
pub fn signed_percent(pct: f64) -> String {
    format!("{:+.1}%", pct + 0.0)
}
