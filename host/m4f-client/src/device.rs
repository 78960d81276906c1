use eyre::{Result, WrapErr, bail};
use std::path::PathBuf;

const RPMSG_PREFIX: &str = "rpmsg";

/// Find the RPMsg endpoint device exposed by the running firmware.
pub fn find_rpmsg_device() -> Result<PathBuf> {
    let dev = std::fs::read_dir("/dev").wrap_err("failed to open /dev")?;
    let names: Vec<String> = dev
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    let name = pick_endpoint(&names)?;
    let path = PathBuf::from("/dev").join(name);
    tracing::info!("using RPMsg device {}", path.display());
    Ok(path)
}

/// From the names of the entries in `/dev`, pick the first RPMsg endpoint in sorted order.
/// Control devices (`rpmsg_ctrl*`) only create endpoints and can't carry messages.
fn pick_endpoint(names: &[String]) -> Result<&str> {
    let mut rpmsg: Vec<&str> = names
        .iter()
        .map(String::as_str)
        .filter(|name| name.starts_with(RPMSG_PREFIX))
        .collect();
    rpmsg.sort_unstable();

    if rpmsg.is_empty() {
        bail!(
            "no RPMsg devices found; is the M4F firmware loaded?\n\
             try: echo start > /sys/class/remoteproc/remoteproc0/state"
        );
    }
    match rpmsg.iter().find(|name| !name.contains("ctrl")) {
        Some(name) => Ok(*name),
        None => bail!(
            "no RPMsg endpoint devices found (only {}); the M4F firmware may not have created an \
             endpoint",
            rpmsg.join(", ")
        ),
    }
}
