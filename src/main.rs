use std::sync::Arc;

use anyhow::Context;
use parking_lot::Mutex;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, EnvFilter};

use style_customizer::{
    view::{render, RenderOptions},
    Config, PresentationRequest, StyleClient, StyleCustomizer, StyleResult, SubmitOutcome,
};

const HELP: &str = "\
Type a style description, then:
  /1 .. /5        use an example prompt
  /go             generate the style (Ctrl-C cancels)
  /use            adopt the generated style
  /payload TITLE  print a presentation request carrying the adopted style
  /show           redraw
  /quit           exit (Ctrl-C at the prompt also exits)";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Logs go to stderr so they don't interleave with the preview
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let config = Config::from_env();
    tracing::info!(endpoint = %config.endpoint(), "Starting style customizer");
    let client = StyleClient::new(&config).context("building HTTP client")?;

    let adopted: Arc<Mutex<Option<StyleResult>>> = Arc::default();
    let sink = adopted.clone();
    let customizer = StyleCustomizer::new(Arc::new(client)).with_callback(move |style| {
        tracing::info!("Custom style received: {}", style.theme_name);
        *sink.lock() = Some(style.clone());
    });
    let opts = RenderOptions { color: config.color };

    println!("{}\n\n{}", render(&customizer.view(), opts), HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        // Ctrl-C exits here; during /go it only cancels the request
        let line = tokio::select! {
            line = lines.next_line() => line.context("reading stdin")?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else { break };
        let line = line.trim();
        match line.split_once(' ').map_or((line, ""), |(cmd, rest)| (cmd, rest.trim())) {
            ("/quit", _) => break,
            ("/show", _) => println!("{}", render(&customizer.view(), opts)),
            ("/go", _) => {
                tokio::select! {
                    outcome = customizer.submit() => {
                        if let SubmitOutcome::Busy = outcome {
                            println!("A style is already being generated.");
                        }
                    }
                    _ = tokio::signal::ctrl_c() => {
                        customizer.cancel();
                        println!("Cancelled.");
                    }
                }
                println!("{}", render(&customizer.view(), opts));
            }
            ("/use", _) => match customizer.confirm_adoption() {
                Some(notice) => println!("{}", notice),
                None => println!("Generate a style first."),
            },
            ("/payload", title) => {
                let title = if title.is_empty() { "Untitled" } else { title };
                let mut request = PresentationRequest::new(title, customizer.prompt());
                if let Some(style) = adopted.lock().clone() {
                    request = request.with_custom_style(style);
                }
                println!("{}", serde_json::to_string_pretty(&request)?);
            }
            (cmd, _) if cmd.starts_with('/') => {
                let picked = cmd[1..].parse::<usize>().ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| customizer.pick_example(i));
                match picked {
                    Some(_) => println!("{}", render(&customizer.view(), opts)),
                    None => println!("{}", HELP),
                }
            }
            _ if line.is_empty() => {}
            _ => customizer.set_prompt(line),
        }
    }

    customizer.unmount();
    Ok(())
}
