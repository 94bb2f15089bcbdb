use std::io::{self, Write};

use crate::format::format_uptime;
use crate::system::snapshot::SystemBanner;

const BANNER_RULE: &str = "--------------------------------------";

pub fn write_banner<W: Write>(out: &mut W, banner: &SystemBanner) -> io::Result<()> {
    writeln!(out, "{BANNER_RULE}")?;
    writeln!(out, "System Name = {}", field(&banner.system_name))?;
    writeln!(out, "Machine Name = {}", field(&banner.machine_name))?;
    writeln!(out, "Version = {}", field(&banner.version))?;
    writeln!(out, "Release = {}", field(&banner.release))?;
    writeln!(out, "Architecture = {}", field(&banner.architecture))?;
    writeln!(
        out,
        "System running since last reboot: {}",
        format_uptime(banner.uptime_secs)
    )?;
    out.flush()
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("unknown")
}
