use log::error;
use std::env;
use std::process::ExitCode;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

use fridge_chef::render::{
    render_attempt, render_footer, render_header, INPUT_EXAMPLE, INPUT_PROMPT,
};
use fridge_chef::{ChefConfig, GenerationAttempt, RecipeChef, RecipeController, Status};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    // Configuration problems are fatal before any input is read
    let config = match ChefConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let controller = match RecipeChef::builder()
        .config(config.clone())
        .build_controller()
    {
        Ok(controller) => controller,
        Err(e) => {
            error!("Failed to initialize recipe provider: {}", e);
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let args: Vec<String> = env::args().skip(1).collect();
    let result = if args.is_empty() {
        interactive(&controller, &config).await
    } else {
        one_shot(&controller, &config, &args.join(" ")).await
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("I/O error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Generate once for the ingredients given on the command line
async fn one_shot(
    controller: &RecipeController,
    config: &ChefConfig,
    ingredients: &str,
) -> io::Result<ExitCode> {
    controller.set_input(ingredients);
    controller.start_generation().await;
    print!("{}", render_attempt(&controller.snapshot(), &config.search));

    Ok(match controller.status() {
        Status::Success => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

/// Read one ingredient list per line until EOF
async fn interactive(controller: &RecipeController, config: &ChefConfig) -> io::Result<ExitCode> {
    let mut stdout = io::stdout();
    let mut lines = BufReader::new(io::stdin()).lines();

    stdout.write_all(render_header().as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout
        .write_all(render_attempt(&controller.snapshot(), &config.search).as_bytes())
        .await?;

    loop {
        stdout
            .write_all(format!("\n{}\n{}\n> ", INPUT_PROMPT, INPUT_EXAMPLE).as_bytes())
            .await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        controller.set_input(line);
        let pending = render_attempt(&pending_view(controller), &config.search);
        stdout.write_all(format!("\n{}", pending).as_bytes()).await?;
        stdout.flush().await?;

        controller.start_generation().await;
        let settled = render_attempt(&controller.snapshot(), &config.search);
        stdout.write_all(format!("\n{}", settled).as_bytes()).await?;
    }

    let footer = render_footer(controller.provider_name());
    stdout.write_all(format!("\n{}", footer).as_bytes()).await?;
    stdout.flush().await?;

    Ok(ExitCode::SUCCESS)
}

/// What the screen shows while the request is in flight
fn pending_view(controller: &RecipeController) -> GenerationAttempt {
    GenerationAttempt {
        input_text: controller.input(),
        status: Status::Pending,
        ..Default::default()
    }
}
