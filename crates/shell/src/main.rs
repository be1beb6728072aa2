//! Responsive box shell - lays out a box configuration and prints the
//! resulting rectangles.

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use layout::{Item, ItemLocation, SizeConfig};
use widgets::{ResponsiveBox, ResponsiveBoxOptions};

/// Responsive box layout shell
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Layout configuration file (JSON); a built-in dashboard sample
    /// is used when omitted
    layout: Option<String>,

    /// Container width
    #[arg(long, default_value = "1280")]
    width: f32,

    /// Container height
    #[arg(long, default_value = "720")]
    height: f32,

    /// Viewport width driving screen classification; defaults to the
    /// container width
    #[arg(long)]
    viewport_width: Option<f32>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// A header/sidebar/content/footer arrangement exercising spans.
fn sample_options() -> ResponsiveBoxOptions {
    ResponsiveBoxOptions {
        rows: vec![
            SizeConfig::ratio(1.0),
            SizeConfig::ratio(4.0),
            SizeConfig::ratio(1.0),
        ],
        cols: vec![SizeConfig::ratio(1.0), SizeConfig::ratio(3.0)],
        items: vec![
            Item::new("header", ItemLocation::with_span(0, 0, 1, 2)),
            Item::new("sidebar", ItemLocation::new(1, 0)),
            Item::new("content", ItemLocation::new(1, 1)),
            Item::new("footer", ItemLocation::with_span(2, 0, 1, 2)),
        ],
        single_column_screen: "xs".to_string(),
        ..ResponsiveBoxOptions::default()
    }
}

fn load_options(path: &str) -> Result<ResponsiveBoxOptions> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut options = match &args.layout {
        Some(path) => {
            info!("Loading layout from: {}", path);
            load_options(path)?
        }
        None => sample_options(),
    };
    options.width = args.width;
    options.height = args.height;

    let item_labels: Vec<String> = options.items.iter().map(|item| item.label.clone()).collect();

    let mut widget = ResponsiveBox::new(options);
    widget.render()?;
    widget.on_resize(args.viewport_width.unwrap_or(args.width))?;

    let screen = widget.current_screen().unwrap_or("none");
    info!("Screen class: {}", screen);

    for (index, label) in item_labels.iter().enumerate() {
        match widget.item_node(index).and_then(|id| widget.tree().get(id)) {
            Some(render_box) => {
                let rect = render_box.rect;
                println!(
                    "{label}: x={} y={} w={} h={}",
                    rect.x, rect.y, rect.width, rect.height
                );
            }
            None => println!("{label}: (not laid out on {screen})"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default() {
        let args = Args::parse_from(["responsive-box"]);
        assert!(args.layout.is_none());
        assert_eq!(args.width, 1280.0);
        assert_eq!(args.height, 720.0);
        assert!(!args.verbose);
    }

    #[test]
    fn test_args_with_layout_file() {
        let args = Args::parse_from(["responsive-box", "dashboard.json", "--width", "640"]);
        assert_eq!(args.layout.as_deref(), Some("dashboard.json"));
        assert_eq!(args.width, 640.0);
    }

    #[test]
    fn test_sample_options_lay_out() {
        let mut widget = ResponsiveBox::new(sample_options());
        widget.render().unwrap();
        assert!(widget.tree().root().is_some());
        // Header spans both columns.
        let header = widget.item_node(0).unwrap();
        let rect = widget.tree().get(header).unwrap().rect;
        assert_eq!(rect.width, 1280.0);
    }
}
