use anyhow::{bail, Context, Result};
use flock_core::{Arena, Vector2D};
use std::io::BufRead;
use std::str::FromStr;

/// Attractor input for a single tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttractorInput {
    Point(Vector2D),
    /// No attractor this tick (e.g. pointer outside the window)
    Absent,
    /// The source has nothing more to give; the loop stops
    End,
}

impl AttractorInput {
    pub fn point(&self) -> Option<Vector2D> {
        match self {
            AttractorInput::Point(p) => Some(*p),
            AttractorInput::Absent | AttractorInput::End => None,
        }
    }
}

/// Supplies the attractor point for each tick.
pub trait AttractorSource {
    fn next_attractor(&mut self, tick: u64) -> Result<AttractorInput>;
}

impl<T: AttractorSource + ?Sized> AttractorSource for Box<T> {
    fn next_attractor(&mut self, tick: u64) -> Result<AttractorInput> {
        (**self).next_attractor(tick)
    }
}

/// Never attracts.
pub struct NoAttractor;

impl AttractorSource for NoAttractor {
    fn next_attractor(&mut self, _tick: u64) -> Result<AttractorInput> {
        Ok(AttractorInput::Absent)
    }
}

/// The same point every tick.
pub struct FixedAttractor(pub Vector2D);

impl AttractorSource for FixedAttractor {
    fn next_attractor(&mut self, _tick: u64) -> Result<AttractorInput> {
        Ok(AttractorInput::Point(self.0))
    }
}

/// Circles around a center point, like a pointer sweeping over the arena.
pub struct OrbitAttractor {
    pub center: Vector2D,
    pub radius: f32,
    /// Radians advanced per tick
    pub angular_speed: f32,
}

impl OrbitAttractor {
    pub fn around_arena(arena: &Arena) -> Self {
        Self {
            center: Vector2D::new(arena.width / 2.0, arena.height / 2.0),
            radius: arena.width.min(arena.height) / 3.0,
            angular_speed: 0.01,
        }
    }
}

impl AttractorSource for OrbitAttractor {
    fn next_attractor(&mut self, tick: u64) -> Result<AttractorInput> {
        let angle = tick as f32 * self.angular_speed;
        let offset = Vector2D::new(angle.cos(), angle.sin()) * self.radius;
        Ok(AttractorInput::Point(self.center + offset))
    }
}

/// Replays attractor positions from text, one line per tick.
///
/// Lines hold `x,y` (or `x y`); an empty line or `-` means no attractor for
/// that tick. Lines starting with `#` are skipped.
pub struct ScriptedAttractor<R> {
    reader: R,
    line_number: usize,
    buffer: String,
}

impl<R: BufRead> ScriptedAttractor<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buffer: String::new(),
        }
    }
}

impl<R: BufRead> AttractorSource for ScriptedAttractor<R> {
    fn next_attractor(&mut self, _tick: u64) -> Result<AttractorInput> {
        loop {
            self.buffer.clear();
            let read = self
                .reader
                .read_line(&mut self.buffer)
                .context("Failed to read attractor script")?;
            if read == 0 {
                return Ok(AttractorInput::End);
            }
            self.line_number += 1;

            let line = self.buffer.trim();
            if line.starts_with('#') {
                continue;
            }
            if line.is_empty() || line == "-" {
                return Ok(AttractorInput::Absent);
            }
            let point = parse_point(line)
                .with_context(|| format!("Invalid attractor on script line {}", self.line_number))?;
            return Ok(AttractorInput::Point(point));
        }
    }
}

fn parse_point(text: &str) -> Result<Vector2D> {
    let mut parts = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty());

    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        bail!("expected two coordinates, got '{}'", text);
    };
    let x: f32 = x.parse().with_context(|| format!("bad x coordinate '{}'", x))?;
    let y: f32 = y.parse().with_context(|| format!("bad y coordinate '{}'", y))?;
    if !x.is_finite() || !y.is_finite() {
        bail!("coordinates must be finite, got '{}'", text);
    }
    Ok(Vector2D::new(x, y))
}

/// Attractor mode selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttractorMode {
    None,
    Center,
    Orbit,
    Fixed(Vector2D),
}

impl FromStr for AttractorMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(AttractorMode::None),
            "center" | "centre" => Ok(AttractorMode::Center),
            "orbit" => Ok(AttractorMode::Orbit),
            other => parse_point(other)
                .map(AttractorMode::Fixed)
                .context("Attractor must be 'none', 'center', 'orbit' or 'x,y'"),
        }
    }
}

impl AttractorMode {
    pub fn into_source(self, arena: &Arena) -> Box<dyn AttractorSource> {
        match self {
            AttractorMode::None => Box::new(NoAttractor),
            AttractorMode::Center => Box::new(FixedAttractor(Vector2D::new(
                arena.width / 2.0,
                arena.height / 2.0,
            ))),
            AttractorMode::Orbit => Box::new(OrbitAttractor::around_arena(arena)),
            AttractorMode::Fixed(point) => Box::new(FixedAttractor(point)),
        }
    }
}
