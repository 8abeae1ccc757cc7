use tracing_subscriber::EnvFilter;

/// Default filter for a verbosity level: `-q` shows errors only, no flag
/// warnings, `-v` our debug output and `-vv` our trace output.
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "pdfdeck=debug,warn",
        _ => "pdfdeck=trace,info",
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the command-line
/// verbosity when set.
pub fn init(verbose: u8, quiet: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(verbose > 0)
        .try_init();
    if let Err(e) = result {
        eprintln!("warning: logging already initialised: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(default_directive(2, true), "error");
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(default_directive(0, false), "warn");
        assert_eq!(default_directive(1, false), "pdfdeck=debug,warn");
        assert_eq!(default_directive(5, false), "pdfdeck=trace,info");
        for v in 0..3 {
            assert!(EnvFilter::try_new(default_directive(v, false)).is_ok());
        }
    }
}
