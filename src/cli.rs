use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(version, author, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure the merchant profile
    Config(ConfigArgs),

    /// Generate a KHQR payment payload and QR code
    Generate(GenerateArgs),

    /// Check the settlement status of a generated payment
    Verify(VerifyArgs),

    /// Show the configured merchant profile
    MerchantInfo,

    /// Start the HTTP API server
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Merchant display name (max 25 bytes)
    #[arg(long, value_name = "NAME")]
    pub merchant_name: Option<String>,

    /// Merchant city (max 15 bytes)
    #[arg(long, value_name = "CITY")]
    pub merchant_city: Option<String>,

    /// Settlement account number at the scheme operator
    #[arg(long, value_name = "ACCOUNT")]
    pub account_number: Option<String>,

    /// Transaction currency (USD or KHR)
    #[arg(long, value_name = "CODE")]
    pub currency: Option<String>,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Amount to request in the merchant currency (e.g: 4.50).
    /// Omit it to generate a static QR where the payer keys in the amount.
    #[arg(short, long)]
    pub amount: Option<f64>,

    /// Bill or invoice reference to embed in the payload
    #[arg(long, value_name = "REF")]
    pub bill: Option<String>,

    /// Print the PNG data URI instead of the terminal QR code
    #[arg(long)]
    pub data_uri: bool,
}

#[derive(Args)]
pub struct VerifyArgs {
    /// Transaction reference returned at generation time
    pub reference: String,

    /// Timeout for the settlement authority call, in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind the API server to
    #[arg(long, default_value = "127.0.0.1:8080", value_name = "ADDR")]
    pub bind: String,
}
