//! Slippy-map helpers for the map tab.

use skycast_weather::Coordinates;

/// Web Mercator latitude limit
const MAX_LATITUDE: f64 = 85.051_128_78;

/// Tile column and row containing `coordinates` at `zoom`.
pub fn tile_for(coordinates: Coordinates, zoom: u8) -> (u32, u32) {
    let n = f64::from(1u32 << zoom.min(30));
    let max_index = n - 1.0;
    let lat = coordinates.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = ((coordinates.lon + 180.0) / 360.0 * n).floor();
    let y = ((1.0 - lat.tan().asinh() / std::f64::consts::PI) / 2.0 * n).floor();
    (x.clamp(0.0, max_index) as u32, y.clamp(0.0, max_index) as u32)
}

/// Fill a `{s}/{z}/{x}/{y}` template for the tile at `coordinates`.
pub fn tile_url(template: &str, coordinates: Coordinates, zoom: u8) -> String {
    let (x, y) = tile_for(coordinates, zoom);
    template
        .replace("{s}", "a")
        .replace("{z}", &zoom.to_string())
        .replace("{x}", &x.to_string())
        .replace("{y}", &y.to_string())
}

/// Longitude and latitude bounds of the terminal map view around `center`.
///
/// Terminal cells are far coarser than tiles, so the view widens by roughly
/// half a slippy zoom level per step instead of a full one.
pub fn view_bounds(center: Coordinates, zoom: u8) -> ([f64; 2], [f64; 2]) {
    let half_lon = (180.0 / 2f64.powf(f64::from(zoom) / 2.5)).max(0.5);
    let half_lat = (half_lon / 2.0).max(0.25);
    (
        [center.lon - half_lon, center.lon + half_lon],
        [
            (center.lat - half_lat).max(-90.0),
            (center.lat + half_lat).min(90.0),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON: Coordinates = Coordinates {
        lat: 51.5085,
        lon: -0.1257,
    };

    #[test]
    fn london_tile_at_zoom_ten() {
        assert_eq!(tile_for(LONDON, 10), (511, 340));
    }

    #[test]
    fn southern_hemisphere_tile() {
        let sydney = Coordinates {
            lat: -33.8688,
            lon: 151.2093,
        };
        assert_eq!(tile_for(sydney, 10), (942, 614));
    }

    #[test]
    fn world_tile_at_zoom_zero() {
        assert_eq!(tile_for(Coordinates { lat: 0.0, lon: 0.0 }, 0), (0, 0));
    }

    #[test]
    fn extreme_coordinates_stay_in_range() {
        let corner = Coordinates {
            lat: 89.9,
            lon: 180.0,
        };
        assert_eq!(tile_for(corner, 3), (7, 0));
    }

    #[test]
    fn fills_template() {
        assert_eq!(
            tile_url("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png", LONDON, 10),
            "https://a.tile.openstreetmap.org/10/511/340.png"
        );
    }

    #[test]
    fn bounds_contain_center() {
        let ([west, east], [south, north]) = view_bounds(LONDON, 10);
        assert!(west < LONDON.lon && LONDON.lon < east);
        assert!(south < LONDON.lat && LONDON.lat < north);
    }
}
