use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

use alpha_shape::{AlphaComplex, Mode, Point};

/// Computes the alpha shape of a set of 2D points and prints it as JSON
#[derive(StructOpt, Debug)]
#[structopt(name = "alpha-shape")]
struct Opt {
    /// Squared radius threshold; `inf` gives the convex hull
    #[structopt(short = "a", long = "alpha")]
    alpha: f64,

    /// Also report singular edges (not bounding any solid triangle)
    #[structopt(short = "g", long = "general")]
    general: bool,

    /// Input file with one `x y` or `x,y` point per line
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    #[structopt(subcommand)]
    query: Query,
}

#[derive(StructOpt, Debug)]
enum Query {
    /// Boundary edges, each as [[x_max, y_max], [x_min, y_min]]
    #[structopt(name = "edges")]
    Edges,

    /// Solid triangles, each as [[x0, y0], [x1, y1], [x2, y2]]
    #[structopt(name = "triangles")]
    Triangles,

    /// Total area of the solid triangles
    #[structopt(name = "area")]
    Area,

    /// Closed boundary rings of the solid part
    #[structopt(name = "loops")]
    Loops,

    /// Counts and area in a single object
    #[structopt(name = "summary")]
    Summary,
}

#[derive(Serialize)]
struct Summary {
    alpha: f64,
    points: usize,
    triangles: usize,
    solid_triangles: usize,
    boundary_edges: usize,
    components: usize,
    area: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let opt = Opt::from_args();

    let points = read_points(&opt.input)?;
    tracing::info!(input = %opt.input.display(), points = points.len(), "read points");

    let mode = if opt.general {
        Mode::General
    } else {
        Mode::Regularized
    };

    let complex = AlphaComplex::with_mode(&points, opt.alpha, mode)
        .with_context(|| format!("computing alpha shape of {}", opt.input.display()))?;

    let json = match opt.query {
        Query::Edges => serde_json::to_string(&complex.boundary_edges())?,
        Query::Triangles => serde_json::to_string(&complex.solid_triangles())?,
        Query::Area => serde_json::to_string(&complex.area())?,
        Query::Loops => serde_json::to_string(&complex.boundary_loops())?,
        Query::Summary => serde_json::to_string_pretty(&Summary {
            alpha: complex.alpha(),
            points: points.len(),
            triangles: complex.triangulation().num_triangles(),
            solid_triangles: complex.solid_faces().count(),
            boundary_edges: complex.boundary_edges().len(),
            components: complex.number_of_solid_components(),
            area: complex.area(),
        })?,
    };

    println!("{}", json);
    Ok(())
}

fn read_points(path: &Path) -> Result<Vec<Point>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    parse_points(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Parses one point per line; blank lines and `#` comments are skipped
fn parse_points(text: &str) -> Result<Vec<Point>> {
    let mut points = Vec::new();

    for (number, line) in text.lines().enumerate() {
        let line = match line.find('#') {
            Some(comment) => &line[..comment],
            None => line,
        };

        let fields = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty())
            .collect::<Vec<_>>();

        match fields.as_slice() {
            [] => continue,
            [x, y] => {
                let x = x
                    .parse::<f64>()
                    .with_context(|| format!("line {}: bad x coordinate {:?}", number + 1, x))?;
                let y = y
                    .parse::<f64>()
                    .with_context(|| format!("line {}: bad y coordinate {:?}", number + 1, y))?;
                points.push(Point::new(x, y));
            }
            _ => bail!(
                "line {}: expected 2 coordinates, found {}",
                number + 1,
                fields.len()
            ),
        }
    }

    Ok(points)
}
