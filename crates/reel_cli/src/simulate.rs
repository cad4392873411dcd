//! Headless list simulation

use std::cell::Cell;
use std::ops::Range;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Args;
use reel_animation::ManualClock;
use reel_core::Vec2;
use reel_view::headless::{HeadlessLayout, HeadlessPresenter, SlotId};
use reel_view::{ItemTemplate, ListConfig, ScrollView};

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// List config (TOML); defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the item count
    #[arg(long)]
    items: Option<usize>,

    /// Number of frames to run
    #[arg(long, default_value_t = 120)]
    frames: usize,

    /// Velocity along the motion axis once the list is ready, units per second
    #[arg(long, allow_hyphen_values = true)]
    fling: Option<f32>,

    /// Ease to this item index once the list is ready
    #[arg(long)]
    scroll_to: Option<usize>,

    /// Scroll-to duration in seconds
    #[arg(long, default_value_t = 0.3)]
    duration: f32,

    /// Frame time in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Viewport size as WIDTHxHEIGHT
    #[arg(long, default_value = "320x480", value_parser = parse_size)]
    viewport: Vec2,

    /// Natural item size as WIDTHxHEIGHT
    #[arg(long, default_value = "320x48", value_parser = parse_size)]
    item: Vec2,
}

fn parse_size(s: &str) -> std::result::Result<Vec2, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: f32 = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
    let h: f32 = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
    if w <= 0.0 || h <= 0.0 {
        return Err(format!("size must be positive, got {w}x{h}"));
    }
    Ok(Vec2::new(w, h))
}

/// Scripted input for one run
#[derive(Debug, Clone)]
pub struct Script {
    pub frames: usize,
    pub fling: Option<f32>,
    pub scroll_to: Option<usize>,
    pub duration: f32,
    pub dt: f32,
    pub viewport: Vec2,
    pub item: Vec2,
}

/// One observed change of the leading line
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub frame: usize,
    pub line: i64,
    pub window: Range<i64>,
    /// Content position along the motion axis
    pub position: f32,
    /// Render callbacks fired since the previous transition
    pub rendered: usize,
}

#[derive(Debug, Default)]
pub struct Report {
    pub transitions: Vec<Transition>,
    pub pool: usize,
    pub instantiated: usize,
    pub renders: usize,
}

/// Run `script` against a headless list built from `config`
pub fn simulate(config: ListConfig, script: &Script) -> Report {
    let axis = config.motion;
    let clock = ManualClock::new();
    let mut view = ScrollView::new(
        config,
        HeadlessPresenter::new(),
        HeadlessLayout::new(script.viewport),
        clock.clone(),
    );
    view.set_template(Some(ItemTemplate::new(1, script.item)));

    let renders = Rc::new(Cell::new(0usize));
    let counter = renders.clone();
    view.on_render(move |_, _: &SlotId| counter.set(counter.get() + 1));

    let mut report = Report::default();
    let mut scripted = false;
    let mut last_line = None;
    let mut reported_renders = 0;

    for frame in 0..script.frames {
        clock.advance(script.dt);
        view.tick();

        if view.is_ready() && !scripted {
            scripted = true;
            if let Some(index) = script.scroll_to {
                view.scroll_to(index, script.duration);
            }
            if let Some(speed) = script.fling {
                view.set_velocity(Vec2::ZERO.with_along(axis, speed));
            }
        }

        let line = view.current_line();
        if line.is_some() && line != last_line {
            last_line = line;
            let total = renders.get();
            report.transitions.push(Transition {
                frame,
                line: line.unwrap_or_default(),
                window: view.window().range(),
                position: view.content_position().along(axis),
                rendered: total - reported_renders,
            });
            reported_renders = total;
        }
    }

    report.pool = view.window().len();
    report.instantiated = view.presenter().instantiated();
    report.renders = renders.get();
    report
}

pub fn run(args: SimulateArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => ListConfig::load(path)
            .with_context(|| format!("failed to load list config {}", path.display()))?,
        None => ListConfig::default().num_items(1_000),
    };
    if let Some(items) = args.items {
        config.num_items = items;
    }
    tracing::info!(
        "simulating {} items, {:?} motion, loop {}, {} frames",
        config.num_items,
        config.motion,
        config.looping,
        args.frames
    );

    let script = Script {
        frames: args.frames,
        fling: args.fling,
        scroll_to: args.scroll_to,
        duration: args.duration,
        dt: args.dt,
        viewport: args.viewport,
        item: args.item,
    };
    let report = simulate(config, &script);

    for t in &report.transitions {
        println!(
            "frame {:>5}  line {:>8}  window {:>8}..{:<8}  position {:>10.2}  rendered {}",
            t.frame, t.line, t.window.start, t.window.end, t.position, t.rendered
        );
    }
    println!(
        "pool {} slots, {} instantiated, {} renders, {} line changes",
        report.pool,
        report.instantiated,
        report.renders,
        report.transitions.len()
    );
    Ok(())
}
