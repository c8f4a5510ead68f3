use rand::seq::SliceRandom;
use rand::Rng;

const GRAVITY: f64 = 14.0;
/// fixed timestep per animation tick, matching the 100ms UI tick
const FRAME_DT: f64 = 0.1;

const HEADLINES: [&str; 5] = [
    "SESSION COMPLETE!",
    "STRONG WORK!",
    "ALL ROUNDS DOWN!",
    "CRUSHED IT!",
    "NAILED IT!",
];

const SYMBOLS: [char; 6] = ['*', '+', 'x', 'o', '~', '.'];

/// one falling spark of the finish burst
#[derive(Debug, Clone)]
pub struct Spark {
    pub x: f64,
    pub y: f64,
    vel_x: f64,
    vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
    ticks_left: u32,
    lifespan: u32,
}

impl Spark {
    fn launch(rng: &mut impl Rng, x: f64, y: f64) -> Self {
        let lifespan = rng.gen_range(18..40);
        Self {
            x,
            y,
            vel_x: rng.gen_range(-4.0..4.0),
            vel_y: rng.gen_range(-5.0..-1.5),
            symbol: *SYMBOLS.choose(rng).unwrap_or(&'*'),
            color_index: rng.gen_range(0..6),
            ticks_left: lifespan,
            lifespan,
        }
    }

    /// advance one tick; false once the spark has burned out
    fn advance(&mut self) -> bool {
        self.x += self.vel_x * FRAME_DT;
        self.y += self.vel_y * FRAME_DT;
        self.vel_y += GRAVITY * FRAME_DT;

        self.ticks_left = self.ticks_left.saturating_sub(1);
        self.ticks_left > 0
    }

    /// remaining life fraction, used to dim ageing sparks
    pub fn fade(&self) -> f64 {
        f64::from(self.ticks_left) / f64::from(self.lifespan)
    }
}

/// finish-line burst shown over the summary screen.
///
/// advanced once per UI tick rather than by wall clock, so the animation
/// can be stepped deterministically.
#[derive(Debug)]
pub struct Celebration {
    pub sparks: Vec<Spark>,
    pub headline: &'static str,
    width: f64,
    height: f64,
    active: bool,
}

impl Celebration {
    pub fn idle() -> Self {
        Self {
            sparks: Vec::new(),
            headline: "",
            width: 0.0,
            height: 0.0,
            active: false,
        }
    }

    pub fn begin(&mut self, width: u16, height: u16) {
        let mut rng = rand::thread_rng();

        self.width = f64::from(width);
        self.height = f64::from(height);
        self.headline = HEADLINES.choose(&mut rng).unwrap_or(&HEADLINES[0]);

        let center_x = self.width / 2.0;
        let center_y = self.height / 2.0;

        self.sparks.clear();
        for _ in 0..40 {
            let x = center_x + rng.gen_range(-12.0..12.0);
            let y = center_y + rng.gen_range(-4.0..4.0);
            self.sparks.push(Spark::launch(&mut rng, x, y));
        }
        self.active = true;
    }

    pub fn on_tick(&mut self) {
        if !self.active {
            return;
        }

        let (width, height) = (self.width, self.height);
        self.sparks.retain_mut(|spark| {
            spark.advance()
                && spark.y < height + 2.0
                && spark.x > -2.0
                && spark.x < width + 2.0
        });

        if self.sparks.is_empty() {
            self.active = false;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Default for Celebration {
    fn default() -> Self {
        Self::idle()
    }
}
