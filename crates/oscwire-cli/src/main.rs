use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use oscwire_core::{
    MAX_PACKET_SIZE, Message, OscClient, Packet, Transport, UdpTransport, decode_packet,
};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("OSCWIRE_BUILD_COMMIT"),
    " ",
    env!("OSCWIRE_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "oscwire")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Encode, decode and exchange OSC (Open Sound Control) packets over UDP.",
    long_about = None,
    after_help = "Examples:\n  oscwire decode packet.osc --stdout --pretty\n  oscwire send 127.0.0.1:9000 /mixer/gain --int32 3 --float32 0.5\n  oscwire listen 9000 --count 10"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a raw OSC packet file into JSON (offline-first).
    #[command(
        after_help = "Examples:\n  oscwire decode packet.osc -o packet.json\n  oscwire decode packet.osc --stdout --pretty"
    )]
    Decode {
        /// Path to a file holding one raw OSC packet
        input: PathBuf,

        /// Output path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        output: Option<PathBuf>,

        /// Write JSON to stdout
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },

    /// Build a message from typed flags and send it over UDP.
    ///
    /// Arguments are appended in flag-group order: int32s, int64s,
    /// float32s, float64s, then strings.
    #[command(
        after_help = "Examples:\n  oscwire send 127.0.0.1:9000 /test --int32 -1 --float32 -0.5 --str string"
    )]
    Send {
        /// Destination as host:port
        target: String,

        /// OSC address pattern (e.g. /mixer/gain)
        address: String,

        /// Append a 32-bit integer argument (repeatable)
        #[arg(long = "int32", value_name = "N", allow_hyphen_values = true)]
        int32: Vec<i32>,

        /// Append a 64-bit integer argument (repeatable)
        #[arg(long = "int64", value_name = "N", allow_hyphen_values = true)]
        int64: Vec<i64>,

        /// Append a 32-bit float argument (repeatable)
        #[arg(long = "float32", value_name = "X", allow_hyphen_values = true)]
        float32: Vec<f32>,

        /// Append a 64-bit float argument (repeatable)
        #[arg(long = "float64", value_name = "X", allow_hyphen_values = true)]
        float64: Vec<f64>,

        /// Append a string argument (repeatable)
        #[arg(long = "str", value_name = "S")]
        str_args: Vec<String>,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },

    /// Bind a UDP port and print each decoded packet as one JSON line.
    #[command(after_help = "Examples:\n  oscwire listen 9000\n  oscwire listen 9000 --count 1 --pretty")]
    Listen {
        /// UDP port to bind on 0.0.0.0
        port: u16,

        /// Exit after this many packets (default: run forever)
        #[arg(long, value_name = "N")]
        count: Option<u64>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Decode {
            input,
            output,
            stdout,
            pretty,
            compact,
            quiet,
        } => cmd_decode(input, output, stdout, pretty, compact, quiet),
        Commands::Send {
            target,
            address,
            int32,
            int64,
            float32,
            float64,
            str_args,
            quiet,
        } => cmd_send(target, address, int32, int64, float32, float64, str_args, quiet),
        Commands::Listen {
            port,
            count,
            pretty,
        } => cmd_listen(port, count, pretty),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(err.to_string(), None)
    }
}

fn cmd_decode(
    input: PathBuf,
    output: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a file holding one raw OSC packet".to_string()),
        ));
    }

    let bytes = fs::read(&input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    if bytes.len() > MAX_PACKET_SIZE {
        return Err(CliError::new(
            format!(
                "input of {} bytes exceeds the {} byte packet limit",
                bytes.len(),
                MAX_PACKET_SIZE
            ),
            Some("OSC packets are single datagrams; split the input".to_string()),
        ));
    }

    let packet = decode_packet(&bytes).map_err(|err| {
        CliError::new(
            format!("OSC decode failed: {err}"),
            Some("the file must hold exactly one encoded message or bundle".to_string()),
        )
    })?;
    let json = serialize_packet(&packet, pretty, compact)?;

    if stdout {
        println!("{}", json);
        return Ok(());
    }

    let output = output.expect("output required when not using stdout");
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(&output, json)
        .with_context(|| format!("Failed to write output: {}", output.display()))?;
    if !quiet {
        eprintln!("OK: decoded packet written -> {}", output.display());
    }
    Ok(())
}

fn cmd_send(
    target: String,
    address: String,
    int32: Vec<i32>,
    int64: Vec<i64>,
    float32: Vec<f32>,
    float64: Vec<f64>,
    str_args: Vec<String>,
    quiet: bool,
) -> Result<(), CliError> {
    if !address.starts_with('/') {
        return Err(CliError::new(
            format!("invalid OSC address '{}'", address),
            Some("addresses start with '/' (e.g. /mixer/gain)".to_string()),
        ));
    }

    let mut msg = Message::new(address);
    for value in int32 {
        msg.add_int32(value);
    }
    for value in int64 {
        msg.add_int64(value);
    }
    for value in float32 {
        msg.add_float32(value);
    }
    for value in float64 {
        msg.add_float64(value);
    }
    for value in str_args {
        msg.add_str(value);
    }

    let transport = UdpTransport::connect(target.as_str()).map_err(|err| {
        CliError::new(
            format!("cannot reach '{}': {}", target, err),
            Some("use host:port (e.g. 127.0.0.1:9000)".to_string()),
        )
    })?;
    let mut client = OscClient::new(transport);
    client
        .send_message(&msg)
        .map_err(|err| CliError::new(format!("send failed: {err}"), None))?;

    if !quiet {
        eprintln!("OK: message sent -> {}", target);
    }
    Ok(())
}

fn cmd_listen(port: u16, count: Option<u64>, pretty: bool) -> Result<(), CliError> {
    let mut transport = UdpTransport::bind(port).map_err(|err| {
        CliError::new(
            format!("cannot bind UDP port {}: {}", port, err),
            Some("the port may be in use; pick another".to_string()),
        )
    })?;

    let mut buffer = vec![0u8; MAX_PACKET_SIZE];
    let mut seen = 0u64;
    loop {
        let received = transport
            .receive(&mut buffer)
            .map_err(|err| CliError::new(format!("receive failed: {err}"), None))?;
        if received == 0 {
            std::thread::sleep(Duration::from_millis(20));
            continue;
        }

        // Malformed packets are logged and skipped; the loop keeps going.
        match decode_packet(&buffer[..received]) {
            Ok(packet) => {
                let json = serialize_packet(&packet, pretty, false)?;
                println!("{}", json);
                seen += 1;
            }
            Err(err) => {
                eprintln!("warning: skipping packet ({received} bytes): {err}");
            }
        }

        if let Some(limit) = count {
            if seen >= limit {
                return Ok(());
            }
        }
    }
}

fn serialize_packet(packet: &Packet, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(packet)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(packet)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}
