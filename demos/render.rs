use std::path::PathBuf;

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_antialiased_line_segment_mut, draw_filled_circle_mut};
use imageproc::pixelops::interpolate;
use rand::Rng;
use structopt::StructOpt;

use alpha_shape::{AlphaComplex, Point};

/// Computes the alpha shape of a noisy ring of random points
/// and saves the result as a PNG image
#[derive(StructOpt, Debug)]
#[structopt(name = "render")]
struct Opt {
    /// Number of points
    #[structopt(short = "c", long = "count", default_value = "1000")]
    count: usize,

    /// Squared radius threshold
    #[structopt(short = "a", long = "alpha", default_value = "400")]
    alpha: f64,

    /// Output image width
    #[structopt(short = "w", long = "width", default_value = "1000")]
    width: u32,

    /// Output image height
    #[structopt(short = "H", long = "height", default_value = "1000")]
    height: u32,

    /// Output file
    #[structopt(short = "o", long = "output", parse(from_os_str))]
    output: PathBuf,
}

fn draw_line(im: &mut RgbImage, a: Point, b: Point, color: Rgb<u8>) {
    draw_antialiased_line_segment_mut(im, a.into(), b.into(), color, interpolate);
}

fn main() {
    let opt = Opt::from_args();

    let mut rng = rand::thread_rng();
    let mut points = Vec::with_capacity(opt.count);

    let center = Point::new(opt.width as f64 / 2.0, opt.height as f64 / 2.0);
    let outer = center.x.min(center.y) * 0.9;
    let inner = outer * 0.4;

    while points.len() < opt.count {
        let x = rng.gen_range(0.0..opt.width as f64);
        let y = rng.gen_range(0.0..opt.height as f64);
        let p = Point::new(x, y);

        let d = p.distance_sq(center);
        if d <= outer * outer && d >= inner * inner {
            points.push(p);
        }
    }

    let t = std::time::Instant::now();
    let complex = match AlphaComplex::new(&points, opt.alpha) {
        Ok(complex) => complex,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };
    println!(
        "Classified {} triangles ({} solid, area {:.1}) in {:?}",
        complex.triangulation().num_triangles(),
        complex.solid_faces().count(),
        complex.area(),
        t.elapsed()
    );

    let t = std::time::Instant::now();
    let mut im = RgbImage::from_pixel(opt.width, opt.height, Rgb([255, 255, 255]));

    for tri in complex.solid_triangles() {
        let grey = Rgb([200, 200, 200]);
        draw_line(&mut im, tri.0, tri.1, grey);
        draw_line(&mut im, tri.1, tri.2, grey);
        draw_line(&mut im, tri.2, tri.0, grey);
    }

    for edge in complex.boundary_edges() {
        draw_line(&mut im, edge.0, edge.1, Rgb([200, 0, 0]));
    }

    for &p in &points {
        draw_filled_circle_mut(&mut im, p.into(), 1, Rgb([0, 0, 0]));
    }

    println!("Drawing took {:?}", t.elapsed());

    let t = std::time::Instant::now();
    if let Err(err) = im.save(&opt.output) {
        eprintln!("failed to save {}: {}", opt.output.display(), err);
        std::process::exit(1);
    }

    println!("Saved as {} in {:?}", opt.output.display(), t.elapsed());
}
