//! Heart Field - Main Application
//! Landing page with an interactive heart field, hosted in eframe

mod animation;
mod config;
mod hearts;
mod host;
mod physics;
mod pointer;
mod render;

use anyhow::Context;
use animation::{HeartsAnimation, LandingHearts, LoopState};
use clap::Parser;
use config::AppConfig;
use host::{EguiFrameScheduler, InputRouter};
use pointer::PointerSender;
use rand::rngs::StdRng;
use rand::SeedableRng;
use render::PainterCanvas;

#[derive(Parser, Debug)]
#[command(name = "heart-field", version, about = "Hearts that flee the pointer and drift home")]
struct Cli {
    /// JSON config file with field, physics and visual settings
    #[arg(short, long)]
    config: Option<String>,

    /// Override the number of hearts
    #[arg(long)]
    count: Option<usize>,

    /// Seed for a reproducible layout
    #[arg(long)]
    seed: Option<u64>,

    /// Run without the hearts canvas
    #[arg(long)]
    no_hearts: bool,

    /// Show frame and heart counters
    #[arg(long)]
    stats: bool,

    /// Write the effective config to this path and exit
    #[arg(long)]
    save_config: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Screen {
    Landing,
    Hub,
}

/// Main application state
struct HeartFieldApp {
    config: AppConfig,
    screen: Screen,
    hearts: LandingHearts<EguiFrameScheduler>,
    pointer: Option<PointerSender>,
    router: InputRouter,
    last_region: Option<egui::Vec2>,
}

impl HeartFieldApp {
    fn new(cc: &eframe::CreationContext<'_>, config: AppConfig, seed: Option<u64>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let animation = config.visual.canvas.then(|| {
            HeartsAnimation::new(
                config.field.clone(),
                config.physics.clone(),
                EguiFrameScheduler::new(cc.egui_ctx.clone()),
                rng,
            )
        });
        let pointer = animation.as_ref().map(HeartsAnimation::pointer_sender);

        Self {
            config,
            screen: Screen::Landing,
            hearts: LandingHearts::attach(animation),
            pointer,
            router: InputRouter::default(),
            last_region: None,
        }
    }

    fn show_screen(&mut self, screen: Screen) {
        if self.screen == screen {
            return;
        }
        log::info!("switching to {:?}", screen);
        match screen {
            Screen::Landing => self.hearts.start(),
            Screen::Hub => self.hearts.stop(),
        }
        self.screen = screen;
    }
}

impl eframe::App for HeartFieldApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.screen {
            Screen::Landing => self.render_landing(ctx),
            Screen::Hub => self.render_hub(ctx),
        }
    }
}

impl HeartFieldApp {
    fn render_landing(&mut self, ctx: &egui::Context) {
        let [r, g, b] = self.config.visual.background;
        let background = egui::Color32::from_rgb(r, g, b);
        let mut next_screen = None;

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(background))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let window = ctx.screen_rect().size();

                // First load sizes the field and starts the loop
                match self.last_region {
                    None => {
                        self.hearts.on_resize(rect.size(), window);
                        self.hearts.start();
                    }
                    Some(size) if size != rect.size() => self.hearts.on_resize(rect.size(), window),
                    Some(_) => {}
                }
                self.last_region = Some(rect.size());

                if let Some(sender) = &self.pointer {
                    let events = ctx.input(|i| i.events.clone());
                    for event in self.router.route(&events, rect) {
                        sender.send(event);
                    }
                }

                let painter = ui.painter_at(rect);
                if let Some(animation) = self.hearts.animation_mut() {
                    let mut canvas = PainterCanvas::new(&painter, rect.min, background);
                    animation.show(&mut canvas);
                }

                ui.vertical_centered(|ui| {
                    ui.add_space(rect.height() * 0.4);
                    ui.heading("Hello there");
                    if ui.button("Continue").clicked() {
                        next_screen = Some(Screen::Hub);
                    }
                });

                if self.config.visual.show_stats {
                    draw_stats(&self.hearts, &painter, rect);
                }
            });

        if let Some(screen) = next_screen {
            self.show_screen(screen);
        }
    }

    fn render_hub(&mut self, ctx: &egui::Context) {
        let mut next_screen = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.heading("Hub");
                ui.label(format!("Hearts: {:?}", self.hearts.state()));
                if ui.button("Back").clicked() {
                    next_screen = Some(Screen::Landing);
                }
            });
        });

        if let Some(screen) = next_screen {
            self.show_screen(screen);
        }
    }
}

fn draw_stats(
    landing: &LandingHearts<EguiFrameScheduler>,
    painter: &egui::Painter,
    rect: egui::Rect,
) {
    let Some(animation) = landing.animation() else {
        return;
    };
    let hearts = animation.field().map_or(0, |field| field.len());
    let running = landing.state() == LoopState::Running;
    let text = format!(
        "{} hearts | frame {} | {}",
        hearts,
        animation.frames(),
        if running { "running" } else { "stopped" }
    );
    painter.text(
        rect.left_top() + egui::vec2(10.0, 10.0),
        egui::Align2::LEFT_TOP,
        text,
        egui::FontId::monospace(12.0),
        egui::Color32::from_rgb(120, 40, 70),
    );
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(count) = cli.count {
        config.field.count = count;
    }
    if cli.no_hearts {
        config.visual.canvas = false;
    }
    if cli.stats {
        config.visual.show_stats = true;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = load_config(&cli)?;
    if let Some(path) = &cli.save_config {
        config.save(path)?;
        log::info!("wrote config to {}", path);
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("Heart Field")
            .with_min_inner_size([320.0, 240.0]),
        ..Default::default()
    };

    let seed = cli.seed;
    eframe::run_native(
        "Heart Field",
        options,
        Box::new(move |cc| Box::new(HeartFieldApp::new(cc, config, seed))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("running the heart field window")
}
