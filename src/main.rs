//! cmdparser-demo - a small file copy front end built on cmdparser.

use anyhow::Context;
use cmdparser::persistence::{user_home_folder, ProcessEnv};
use cmdparser::{logging, shell, CmdError, CmdParser, OptionFlags, Settings};
use tracing::{error, info};

fn main() {
    logging::init_stderr_logging();

    if let Err(e) = run() {
        let category = e
            .downcast_ref::<CmdError>()
            .map(CmdError::category)
            .unwrap_or("Error");
        error!("{}: {:#}", category, e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args_os()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();

    let mut settings =
        Settings::default().with_title(format!("cmdparser-demo {}", env!("CARGO_PKG_VERSION")));
    if let Some(home) = user_home_folder(&ProcessEnv).or_else(dirs::home_dir) {
        settings = settings.with_options_file(home.join(".cmdparser-demo").join("options.json"));
    }

    let mut parser = build_parser(settings).context("Failed to set up options")?;
    let outcome = shell::run(&mut parser, &args, &mut std::io::stdout().lock())?;
    info!("Done with {:?}", outcome.action);
    Ok(())
}

/// Registers the demo's options and commands.
fn build_parser(settings: Settings) -> cmdparser::Result<CmdParser> {
    let mut parser = CmdParser::new(settings);
    let options = parser.options_mut();

    let verbose = options.bool_option(
        "verbose",
        "",
        "Show verbose output",
        false,
        OptionFlags::PREFERENCE,
    )?;
    let user = options.string_option(
        "user",
        "",
        "<username>",
        "Username",
        "",
        OptionFlags::PREFERENCE | OptionFlags::REQUIRED,
    )?;
    let password = options.string_option(
        "password",
        "",
        "<password>",
        "Password",
        "",
        OptionFlags::STANDARD,
    )?;
    let accesskey = options.bytes_option(
        "accesskey",
        "",
        "",
        "Client access key",
        Vec::new(),
        OptionFlags::PREFERENCE | OptionFlags::HIDDEN,
    )?;
    let ignore = options.string_list_option(
        "ignore",
        "copy",
        "<pattern>",
        "Ignore files matching pattern",
        Vec::new(),
        OptionFlags::PREFERENCE,
    )?;
    let bwlimit = options.int_option(
        "bwlimit",
        "copy",
        "<KiB/s>",
        "Limit bandwidth, 0 for unlimited",
        0,
        OptionFlags::STANDARD,
    )?;

    options.on_change(password, move |table| {
        let name = table.get(user).unwrap_or_default();
        let secret = table.get(password).unwrap_or_default();
        table.set(accesskey, format!("{name}:{secret}").into_bytes());
    });
    options.on_save(accesskey, move |table| {
        if table.get(user).unwrap_or_default().is_empty() {
            return Err("unable to save login unless both user and password are set".into());
        }
        Ok(())
    });

    parser.command("", "", move |ctx| {
        let name = ctx.options.get(user).unwrap_or_default();
        println!("Logged in as {name}");
        if ctx.options.get(verbose).unwrap_or_default() {
            println!("Arguments: {:?}", ctx.args.get(1..).unwrap_or_default());
        }
        Ok(())
    })?;

    parser.command("copy", "<src> <dst>", move |ctx| {
        let [_, _, src, dst, ..] = ctx.args else {
            return Err("copy needs <src> and <dst>".into());
        };
        let ignore = ctx.options.get(ignore).unwrap_or_default();
        let limit = ctx.options.get(bwlimit).unwrap_or_default();
        println!("Would copy {src} to {dst}");
        if !ignore.is_empty() {
            println!("Ignoring: {}", ignore.join(", "));
        }
        if limit > 0 {
            println!("Bandwidth limit: {limit} KiB/s");
        }
        Ok(())
    })?;

    Ok(parser)
}
