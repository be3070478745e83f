//! Login arguments

use clap::Parser;

/// Arguments for 'login'
///
/// The token and email come from the global `--token`/`--email` flags or the
/// environment; whatever is missing is prompted for.
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
        favroctl login\n  \
        favroctl login --email me@example.com --token <TOKEN>\n  \
        FAVRO_TOKEN=<TOKEN> favroctl login --no-email")]
pub struct LoginArgs {
    /// Do not ask for an email, authenticate with the bare token
    #[arg(long, default_value_t = false)]
    pub no_email: bool,
}
