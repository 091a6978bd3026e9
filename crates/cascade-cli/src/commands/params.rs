//! Parameter registry listing.

use cascade_core::ParamScale;
use cascade_core::param_info::PARAMS;

use super::common::format_value;

pub fn run() -> anyhow::Result<()> {
    println!("Parameters:\n");
    println!(
        "  {:<5} {:<16} {:<8} {:<12} {:<8} {}",
        "ID", "Name", "Short", "Range", "Default", "Scale"
    );
    println!("  {}", "-".repeat(62));

    for desc in &PARAMS {
        let range = format!("{} - {}", desc.min, desc.max);
        let scale = match desc.scale {
            ParamScale::Linear => "linear".to_string(),
            ParamScale::Stepped(steps) => format!("stepped ({steps})"),
            ParamScale::Toggle => "toggle".to_string(),
        };
        println!(
            "  {:<5} {:<16} {:<8} {:<12} {:<8} {}",
            desc.id.0,
            desc.name,
            desc.short_name,
            range,
            format_value(desc, desc.default),
            scale
        );
    }
    Ok(())
}
