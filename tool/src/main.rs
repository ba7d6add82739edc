use clap::Parser;
use logpixels::{Display, PrimaryDisplay};
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Print the horizontal pixel density of the primary display.
#[derive(Debug, Default, Parser)]
#[command(version, about)]
struct Args {
	/// Print the scaling factor relative to 96 DPI instead of the density.
	#[arg(long)]
	scale: bool,
}

fn main() -> ExitCode {
	let args = Args::parse();
	init_logging();

	/* Without this, the system hands us the virtualized density of 96 no
	 * matter what the display scaling is set to. */
	let _ = logpixels::declare_dpi_aware();

	let stdout = std::io::stdout();
	let mut stdout = stdout.lock();
	ExitCode::from(run(&PrimaryDisplay, &args, &mut stdout))
}

/// Log to stderr only, and only when asked to through `RUST_LOG`, so that
/// stdout carries nothing but the reading.
fn init_logging() {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new("off"));
	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.try_init();
}

/// Query the given display and print the reading, returning the exit code.
fn run<D, W>(display: &D, args: &Args, out: &mut W) -> u8
	where D: Display + ?Sized,
		  W: Write {

	let dpi = match logpixels::query_horizontal_dpi_from(display) {
		Ok(dpi) => dpi,
		Err(what) => {
			tracing::error!("{}", what);
			return 1
		}
	};

	let written = if args.scale {
		write!(out, "{}", dpi.scale_factor())
	} else {
		write!(out, "{}", dpi)
	};
	match written.and_then(|_| out.flush()) {
		Ok(_) => 0,
		Err(what) => {
			tracing::error!("could not write the reading: {}", what);
			1
		}
	}
}
