use anyhow::{bail, Context};
use log::{info, warn};
use std::fs;
use traffic_view::{feed, Client, ClientConfig, FeedEvent, Outbound, SvgCanvas};

const USAGE: &str = "usage: traffic-view <recording.jsonl> [out.svg] [width] [height] [config.json]";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let Some(input) = args.first() else {
        bail!(USAGE);
    };
    let output = args.get(1).map_or("frame.svg", String::as_str);
    let width = parse_dim(args.get(2), 1200).context("invalid width")?;
    let height = parse_dim(args.get(3), 800).context("invalid height")?;
    let config = match args.get(4) {
        Some(path) => {
            let json = fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
            ClientConfig::from_json_str(&json).with_context(|| format!("loading {}", path))?
        }
        None => ClientConfig::default(),
    };

    let recording = fs::read_to_string(input).with_context(|| format!("reading {}", input))?;
    let canvas = SvgCanvas::new(width, height).with_chart_color(&config.palette.chart_line);
    let mut client = Client::new(config, Vec::<Outbound>::new(), canvas, width, height)?;

    client.handle_event(FeedEvent::Connected)?;
    client.start(None);

    let mut replayed = 0;
    for (idx, line) in recording.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match feed::decode(line) {
            Ok(msg) => {
                client
                    .handle_event(FeedEvent::Message(msg))
                    .with_context(|| format!("line {}", idx + 1))?;
                replayed += 1;
            }
            Err(err) => warn!("Skipping line {}: {}", idx + 1, err),
        }
    }

    if client.viewport().is_none() {
        bail!("{} contains no init_data message", input);
    }
    info!(
        "Replayed {} messages ({} roads, {} cars in last frame)",
        replayed,
        client.roads().len(),
        client.snapshot().cars.len()
    );

    fs::write(output, client.frontend().finish()).with_context(|| format!("writing {}", output))?;
    info!("Wrote {}", output);
    Ok(())
}

fn parse_dim(arg: Option<&String>, default: u32) -> anyhow::Result<u32> {
    match arg {
        Some(value) => Ok(value.parse()?),
        None => Ok(default),
    }
}
