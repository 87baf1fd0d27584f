//! Piece Board demo host loop
//!
//! Bounces a handful of balls around a surface while a paddle chases the
//! first one, logs hits, and exports the final frame. Build with
//! `--features window` to watch it live.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use piece_board::{Ball, Color, Piece, PieceStyle, Sprite, Surface, SurfaceError};

const SURFACE_WIDTH: u32 = 480;
const SURFACE_HEIGHT: u32 = 270;
const BALL_COUNT: usize = 4;
#[cfg(not(feature = "window"))]
const HEADLESS_TICKS: u32 = 600;

const PALETTE: [Color; 4] = [
    Color::RED,
    Color::BLUE,
    Color::GREEN,
    Color::rgb(255, 165, 0),
];

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(12345);
    log::info!("Piece Board starting (seed {})", seed);

    if let Err(e) = run(seed) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(seed: u64) -> Result<(), SurfaceError> {
    let surface = Surface::shared(SURFACE_WIDTH, SURFACE_HEIGHT)?;
    let mut rng = Pcg32::seed_from_u64(seed);

    let mut balls: Vec<Ball> = (0..BALL_COUNT)
        .map(|i| {
            let style = PieceStyle::ball()
                .with_color(PALETTE[i % PALETTE.len()])
                .with_speed(rng.random_range(1.5..4.0));
            let mut ball = Ball::new(rng.random_range(5.0..12.0), &surface, style);
            let (dx, dy) = (ball.piece().velocity().x, ball.piece().velocity().y);
            if rng.random_bool(0.5) {
                ball.piece_mut().set_velocity(-dx, dy);
            }
            let x = rng.random_range(40.0..(SURFACE_WIDTH as f32 - 40.0));
            let y = rng.random_range(40.0..(SURFACE_HEIGHT as f32 - 40.0));
            ball.draw(x, y);
            ball
        })
        .collect();

    let mut paddle = Piece::new(
        60.0,
        8.0,
        &surface,
        PieceStyle::piece().with_color(Color::WHITE),
    );
    paddle.draw(paddle.x(), SURFACE_HEIGHT as f32 - 20.0);

    #[cfg(feature = "window")]
    {
        let mut window = surface.borrow().display("Piece Board")?;
        let mut tick_count = 0u32;
        while window.is_open() {
            step(&mut balls, &mut paddle, tick_count);
            window.present(&surface.borrow())?;
            tick_count += 1;
        }
    }

    #[cfg(not(feature = "window"))]
    {
        for tick_count in 0..HEADLESS_TICKS {
            step(&mut balls, &mut paddle, tick_count);
        }
    }

    surface.borrow().export_default()?;
    Ok(())
}

/// One frame: bounce every ball, steer the paddle, report contacts
fn step(balls: &mut [Ball], paddle: &mut Piece, tick_count: u32) {
    for ball in balls.iter_mut() {
        ball.bounce();
    }

    if let Some(lead) = balls.first() {
        let paddle_center = paddle.x() + paddle.width() / 2.0;
        if lead.center().x > paddle_center + paddle.velocity().x {
            paddle.go_right();
        } else if lead.center().x < paddle_center - paddle.velocity().x {
            paddle.go_left();
        }
    }
    // Balls paint over the paddle on overlap; repaint it last
    paddle.draw(paddle.x(), paddle.y());

    for (i, ball) in balls.iter().enumerate() {
        if ball.hit(&*paddle) {
            log::info!("Tick {}: ball {} hit the paddle", tick_count, i);
        }
        for (j, other) in balls.iter().enumerate().skip(i + 1) {
            if ball.hit(other) {
                log::debug!("Tick {}: balls {} and {} touch", tick_count, i, j);
            }
        }
    }

    if tick_count % 120 == 0 {
        let probe = (SURFACE_WIDTH as f32 / 2.0, SURFACE_HEIGHT as f32 / 2.0);
        let covering = balls
            .iter()
            .filter(|b| b.is_point_in(probe.0, probe.1))
            .count();
        log::debug!("Tick {}: {} ball(s) cover the center", tick_count, covering);
    }
}
