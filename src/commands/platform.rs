//! `opit platform`

use crate::ui;
use anyhow::Result;
use declarative::{Facts, SystemRunner};
use ::platform::{PlatformInfo, Resolver};
use std::sync::Arc;

const FACT_NAMES: &[&str] = &["platform", "family", "version", "build_version"];

pub fn run() -> Result<()> {
    let info = Resolver::for_host(Arc::new(SystemRunner)).identify()?;
    show(&info);
    Ok(())
}

fn show(info: &PlatformInfo) {
    ui::header("Platform");
    for name in FACT_NAMES {
        let value = info.get(name);
        if value.is_empty() {
            ui::dim(&format!("{name}: -"));
        } else {
            ui::kv(name, &value);
        }
    }
}
