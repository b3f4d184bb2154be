use dehighlight::edges::{detect_edges, remove_edgy_regions};
use dehighlight::hough::{hough_forward, hough_inverse, mask_peaks};
use dehighlight::image::io::{load_raster, save_raster};
use dehighlight::pipeline::{boundary_peaks, DehighlightParams};
use dehighlight::resample::rescale_bilinear;
use std::env;
use std::path::{Path, PathBuf};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let input = args.next().ok_or_else(usage)?;
    let out_dir = PathBuf::from(args.next().ok_or_else(usage)?);
    let params = DehighlightParams::default();

    let image = load_raster(Path::new(&input))?;
    let small = rescale_bilinear(&image, params.downscale);
    let edges = detect_edges(&small, &params.canny);
    let filtered = remove_edgy_regions(&edges, params.edgy_radius, params.edgy_fullness);

    let space = hough_forward(&filtered, params.hough.theta_scale, params.hough.rho_scale)
        .map_err(|e| e.to_string())?;
    let masked = mask_peaks(&space, params.hough.mask_radius, params.hough.mask_factor);
    let candidates = masked.cells().len();
    let peaks = boundary_peaks(&space, &params.hough);
    let reverse = hough_inverse(&peaks, small.w, small.h);

    save_raster(&edges, &out_dir.join("canny.png"))?;
    save_raster(&filtered, &out_dir.join("canny-filtered.png"))?;
    save_raster(&space.votes, &out_dir.join("hough.png"))?;
    save_raster(&reverse, &out_dir.join("reverse.png"))?;

    println!(
        "{}x{} -> {}x{}, {} edge pixels, {} lines of {} candidates",
        image.w,
        image.h,
        small.w,
        small.h,
        filtered.data.iter().filter(|&&v| v > 0.0).count(),
        peaks.len(),
        candidates
    );
    for peak in &peaks {
        println!(
            "  theta={:.1}deg rho={:.1} weight={:.3}",
            peak.line.theta.to_degrees(),
            peak.line.rho,
            peak.weight
        );
    }
    println!("Maps written to {}", out_dir.display());
    Ok(())
}

fn usage() -> String {
    "Usage: edge_map <input image> <output dir>".to_string()
}
