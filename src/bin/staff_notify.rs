//! Company notice board demo.
//!
//! Posts two notices to two staff members, detaching the second member in
//! between, and prints what each member has cached after every notice.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;

use observe::staff::{Staff, StaffNotify};
use observe::{ObserveResult, Publisher, RegistryConfig};

/// Company notice board demo
#[derive(Parser, Debug)]
#[command(name = "staff-notify")]
#[command(version, about = "Broadcast company notices to attached staff")]
struct Args {
    /// Notice on the board before anyone is attached
    #[arg(long, default_value = "company info")]
    initial: String,

    /// First notice, delivered to both staff members
    #[arg(long, default_value = "holiday tomorrow")]
    first: String,

    /// Second notice, posted after the second member is detached
    #[arg(long, default_value = "ten days off for national day")]
    second: String,

    /// Registry config (JSON)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("staff_notify=info,observe=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> ObserveResult<()> {
    let cfg = match &args.config {
        Some(path) => RegistryConfig::from_path(path)?,
        None => RegistryConfig::default(),
    };
    tracing::info!(delivery = ?cfg.delivery, prune_on_notify = cfg.prune_on_notify, "registry config loaded");

    let mut board = StaffNotify::with_config(Some(args.initial.clone()), cfg);
    let s1 = Rc::new(RefCell::new(Staff::named("s1")));
    let s2 = Rc::new(RefCell::new(Staff::named("s2")));

    board.attach(&s1);
    board.attach(&s2);

    let report = board.set_company_info(args.first.as_str())?;
    tracing::info!(broadcast_id = %report.broadcast_id, delivered = report.delivered, "first notice posted");
    print_cached(&s1, &s2);

    board.detach(&s2)?;

    let report = board.set_company_info(args.second.as_str())?;
    tracing::info!(broadcast_id = %report.broadcast_id, delivered = report.delivered, "second notice posted");
    print_cached(&s1, &s2);

    Ok(())
}

fn print_cached(s1: &Rc<RefCell<Staff>>, s2: &Rc<RefCell<Staff>>) {
    println!("{}", s1.borrow().info().unwrap_or("<none>"));
    println!("{}", s2.borrow().info().unwrap_or("<none>"));
}
