use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "base-wallet-stats", version, about = "Public activity stats for a Base wallet")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up days active, tx count and gas spent for one address
    Stats {
        /// 0x-prefixed, 40 hex character address
        address: String,
    },
    /// Run the HTTP API server
    Serve {
        /// Override bind address, e.g. 0.0.0.0:8080
        #[arg(long)]
        addr: Option<String>,
    },
}
