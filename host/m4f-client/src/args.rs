use std::path::PathBuf;
use std::time::Duration;

/// Command that drops into the interactive prompt instead of sending anything.
pub const INTERACTIVE: &str = "interactive";

/// Talk to the M4F firmware over its RPMsg character device.
#[derive(clap::Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct CmdArgs {
    /// Command to send (ping, status, echo), or `interactive`
    #[arg(default_value = INTERACTIVE)]
    pub command: String,

    /// Additional words appended to the command, e.g. the message for `echo`
    pub args: Vec<String>,

    /// RPMsg endpoint device; will try to autodetect if not specified
    #[arg(short, long)]
    pub device: Option<PathBuf>,

    /// Seconds to wait for a response
    #[arg(short, long, default_value = "2.0", value_parser = parse_timeout)]
    pub timeout: Duration,

    /// Only print warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl CmdArgs {
    /// The message as it goes over the wire: the command, then any arguments separated by spaces.
    pub fn message(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_interactive(&self) -> bool {
        self.command == INTERACTIVE
    }
}

fn parse_timeout(s: &str) -> Result<Duration, String> {
    let secs: f64 = s.parse().map_err(|e| format!("{s:?} is not a number: {e}"))?;
    if secs <= 0.0 {
        return Err(format!("timeout must be positive, got {secs}"));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(argv: &[&str]) -> CmdArgs {
        CmdArgs::try_parse_from(std::iter::once("m4f-client").chain(argv.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert!(args.is_interactive());
        assert_eq!(args.timeout, Duration::from_secs(2));
        assert_eq!(args.device, None);
    }

    #[test]
    fn test_message_joins_arguments() {
        let args = parse(&["echo", "Hello", "M4F"]);
        assert_eq!(args.message(), "echo Hello M4F");
        assert_eq!(parse(&["ping"]).message(), "ping");
    }

    #[test]
    fn test_options() {
        let args = parse(&["-d", "/dev/rpmsg0", "-t", "0.5", "status"]);
        assert_eq!(args.device, Some(PathBuf::from("/dev/rpmsg0")));
        assert_eq!(args.timeout, Duration::from_millis(500));
        assert_eq!(args.message(), "status");
    }

    #[test]
    fn test_options_after_words() {
        let args = parse(&["echo", "hello", "-t", "0.5", "-q"]);
        assert_eq!(args.message(), "echo hello");
        assert_eq!(args.timeout, Duration::from_millis(500));
        assert!(args.quiet);
    }

    #[test]
    fn test_bad_timeout() {
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("-1").is_err());
        assert!(parse_timeout("soon").is_err());
    }
}
