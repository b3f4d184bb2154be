use super::HoughSpace;
use crate::error::{positive_at_most, DehighlightError};
use crate::image::Raster;
use log::debug;

/// Vote every non-zero pixel of `edges` into a `(θ, ρ)` accumulator.
///
/// Each pixel adds its own value to one offset bucket per angle bucket, so
/// strong edges weigh more than faint ones. The result is normalized to
/// `[0, 1]`. Scales that are not finite and positive (or a theta scale
/// above 180°) fail with [`DehighlightError::InvalidParameter`].
pub fn hough_forward(
    edges: &Raster,
    theta_scale: f64,
    rho_scale: f64,
) -> Result<HoughSpace, DehighlightError> {
    positive_at_most("theta_scale", theta_scale, 180.0, "degrees in (0, 180]")?;
    positive_at_most("rho_scale", rho_scale, f64::MAX, "a finite positive pixel count")?;
    let theta_buckets = ((180.0 / theta_scale).round() as usize).max(1);
    let max_dist = (edges.w as f64).hypot(edges.h as f64);
    let rho_buckets = ((2.0 * max_dist + 1.0) / rho_scale).ceil() as usize;
    let last_row = rho_buckets.saturating_sub(1) as isize;

    let (cos_table, sin_table): (Vec<f64>, Vec<f64>) = (0..theta_buckets)
        .map(|i| {
            let theta = (i as f64 * theta_scale - 90.0).to_radians();
            (theta.cos(), theta.sin())
        })
        .unzip();

    let mut votes = Raster::gray(theta_buckets, rho_buckets);
    let mut voters = 0usize;
    for (x, y) in edges.coords() {
        let v = edges.get(x, y);
        if v <= 0.0 {
            continue;
        }
        voters += 1;
        let (xf, yf) = (x as f64, y as f64);
        for (i, (c, s)) in cos_table.iter().zip(&sin_table).enumerate() {
            let rho = xf * c + yf * s;
            let j = ((rho + max_dist) / rho_scale).round() as isize;
            let j = j.clamp(0, last_row) as usize;
            let k = j * theta_buckets + i;
            votes.data[k] += v;
        }
    }
    votes.normalize()?;

    debug!(
        "Hough {}x{} from {} voters (max_dist={:.1})",
        theta_buckets, rho_buckets, voters, max_dist
    );
    Ok(HoughSpace {
        votes,
        theta_scale,
        rho_scale,
        max_dist,
    })
}
