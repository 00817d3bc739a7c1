use clap::{Args, Parser, Subcommand};
use portfolio_contact::ContactSubmission;

mod send;
mod server;

pub use send::send;
pub use server::serve;

/// portfolio - personal site server and contact relay
#[derive(Parser, Debug)]
#[command(name = "portfolio")]
#[command(about = "Serve the portfolio site and relay contact messages", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Submit a contact message to a running relay
    Send(SendArgs),
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Relay endpoint (overrides config file)
    #[arg(long)]
    pub endpoint: Option<String>,

    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub subject: String,

    #[arg(long, default_value = "")]
    pub message: String,
}

impl SendArgs {
    pub fn submission(&self) -> ContactSubmission {
        ContactSubmission::new(
            self.name.clone(),
            self.email.clone(),
            self.subject.clone(),
            self.message.clone(),
        )
    }
}
