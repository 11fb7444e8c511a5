use layer_painter::{Color, DrawStyle, LayerRegistry, Painter};

const GRID_SIZE_X: u32 = 32;
const GRID_SIZE_Y: u32 = 32;

fn parse_style_arg() -> DrawStyle {
    let mut style = DrawStyle::Unique;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--set" | "--style=set" => style = DrawStyle::Unique,
            "--add" | "--style=add" => style = DrawStyle::Additive,
            "--sequence" | "--style=sequence" => style = DrawStyle::Sequential,
            "--style" => {
                if let Some(next) = args.next() {
                    match next.parse() {
                        Ok(parsed) => style = parsed,
                        Err(err) => log::warn!("{err}, keeping {}", style.label()),
                    }
                }
            }
            _ => {}
        }
    }
    style
}

/// Coarse terminal render: one luminance character per cell column pair.
fn print_grid(painter: &mut Painter, timestamp: f32) {
    const RAMP: &[u8] = b" .:-=+*#%@";
    for y in 0..GRID_SIZE_Y {
        let mut line = String::new();
        for x in 0..GRID_SIZE_X {
            let c = painter
                .get_color(x, y, Color::white(), timestamp)
                .unwrap_or(Color::white());
            let luma = (c.r as u32 * 30 + c.g as u32 * 59 + c.b as u32 * 11) / 100;
            let idx = (255 - luma) as usize * (RAMP.len() - 1) / 255;
            line.push(RAMP[idx] as char);
            line.push(RAMP[idx] as char);
        }
        println!("{line}");
    }
}

fn main() -> layer_painter::Result<()> {
    env_logger::init();

    let style = parse_style_arg();
    let registry = LayerRegistry::standard();
    let mut painter = Painter::new(style, GRID_SIZE_X, GRID_SIZE_Y, registry.clone())?;
    log::info!(
        "scripted {} session on a {GRID_SIZE_X}x{GRID_SIZE_Y} grid",
        style.label()
    );

    let darken = registry.by_name("darken").expect("standard registry");
    let rainbow = registry.by_name("rainbow").expect("standard registry");
    let black = registry.by_name("black").expect("standard registry");

    // A small scripted session standing in for the interactive event loop.
    let mut timestamp = 0.0_f32;
    painter.paint(black, 16, 16)?;
    painter.increase_brush_size();
    painter.paint(rainbow, 8, 8)?;
    painter.paint(darken, 24, 20)?;
    timestamp += 0.05;

    painter.special()?;
    painter.undo()?;
    painter.undo()?;
    painter.redo()?;
    timestamp += 0.05;

    let render_t = timestamp;
    println!("live session ({}):", style.label());
    print_grid(&mut painter, render_t);

    painter.start_replay()?;
    let mut ticks = 0u32;
    while !painter.play_next_action()? {
        ticks += 1;
        timestamp += 0.05;
    }
    log::info!("replay finished after {ticks} ticks");

    // Same clock value so time-driven layers render identically.
    println!("replayed session:");
    print_grid(&mut painter, render_t);
    Ok(())
}
