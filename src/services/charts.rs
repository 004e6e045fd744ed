use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use plotters::prelude::*;

use crate::services::report::CategorySlice;

// Vintage palette carried over from the dashboard styling.
const PALETTE: [RGBColor; 6] = [
    RGBColor(0x8b, 0x6f, 0x47),
    RGBColor(0xb8, 0x86, 0x0b),
    RGBColor(0xd4, 0xa5, 0x74),
    RGBColor(0xa0, 0x52, 0x2d),
    RGBColor(0xcd, 0x85, 0x3f),
    RGBColor(0xda, 0xa5, 0x20),
];
const BACKGROUND: RGBColor = RGBColor(0xfe, 0xfb, 0xf3);
const INK: RGBColor = RGBColor(0x3e, 0x27, 0x23);

fn chart_err<E: std::fmt::Display>(e: E) -> anyhow::Error {
    anyhow::anyhow!("chart rendering failed: {}", e)
}

/// Mean price per category as a bar chart, base64-encoded PNG.
pub fn mean_price_bar_png(slices: &[CategorySlice]) -> anyhow::Result<String> {
    if slices.is_empty() {
        return Ok(String::new());
    }

    const WIDTH: u32 = 800;
    const HEIGHT: u32 = 400;
    let mut buffer = vec![0u8; (WIDTH * HEIGHT * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&BACKGROUND).map_err(chart_err)?;

        let y_max = slices
            .iter()
            .map(|s| s.mean_price)
            .fold(0.0, f64::max)
            .max(1.0)
            * 1.15;

        let mut chart = ChartBuilder::on(&root)
            .caption("Average Price by Category", ("serif", 24).into_font().color(&INK))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d((0..slices.len()).into_segmented(), 0.0..y_max)
            .map_err(chart_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(slices.len())
            .x_label_formatter(&|value| match value {
                SegmentValue::CenterOf(i) => slices
                    .get(*i)
                    .map(|s| s.category.clone())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .y_desc("Average price (INR)")
            .label_style(("serif", 13).into_font().color(&INK))
            .draw()
            .map_err(chart_err)?;

        chart
            .draw_series(slices.iter().enumerate().map(|(i, slice)| {
                Rectangle::new(
                    [
                        (SegmentValue::Exact(i), 0.0),
                        (SegmentValue::Exact(i + 1), slice.mean_price),
                    ],
                    PALETTE[i % PALETTE.len()].filled(),
                )
            }))
            .map_err(chart_err)?;

        root.present().map_err(chart_err)?;
    }

    encode_png(&buffer, WIDTH, HEIGHT)
}

/// Record count per category as a pie chart, base64-encoded PNG.
pub fn category_share_pie_png(slices: &[CategorySlice]) -> anyhow::Result<String> {
    if slices.is_empty() {
        return Ok(String::new());
    }

    const WIDTH: u32 = 640;
    const HEIGHT: u32 = 640;
    let mut buffer = vec![0u8; (WIDTH * HEIGHT * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&BACKGROUND).map_err(chart_err)?;
        root.titled("Product Distribution by Category", ("serif", 24).into_font().color(&INK))
            .map_err(chart_err)?;

        let sizes: Vec<f64> = slices.iter().map(|s| s.count as f64).collect();
        let labels: Vec<String> = slices
            .iter()
            .map(|s| format!("{} ({})", s.category, s.count))
            .collect();
        let colors: Vec<RGBColor> = slices
            .iter()
            .enumerate()
            .map(|(i, _)| PALETTE[i % PALETTE.len()])
            .collect();

        let center = (WIDTH as i32 / 2, HEIGHT as i32 / 2);
        let radius = WIDTH as f64 * 0.32;
        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(90.0);
        pie.label_style(("serif", 15).into_font().color(&INK));
        root.draw(&pie).map_err(chart_err)?;

        root.present().map_err(chart_err)?;
    }

    encode_png(&buffer, WIDTH, HEIGHT)
}

/// Price distribution histogram over precomputed bins, base64-encoded PNG.
pub fn price_histogram_png(bins: &[(f64, usize)]) -> anyhow::Result<String> {
    if bins.is_empty() {
        return Ok(String::new());
    }

    const WIDTH: u32 = 800;
    const HEIGHT: u32 = 400;
    let mut buffer = vec![0u8; (WIDTH * HEIGHT * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&BACKGROUND).map_err(chart_err)?;

        let y_max = bins.iter().map(|(_, count)| *count).max().unwrap_or(1) + 1;

        let mut chart = ChartBuilder::on(&root)
            .caption("Price Distribution", ("serif", 24).into_font().color(&INK))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d((0..bins.len()).into_segmented(), 0..y_max)
            .map_err(chart_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(bins.len().min(10))
            .x_label_formatter(&|value| match value {
                SegmentValue::CenterOf(i) => bins
                    .get(*i)
                    .map(|(lower, _)| format!("{:.0}", lower))
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .y_desc("Number of products")
            .x_desc("Price (INR)")
            .label_style(("serif", 13).into_font().color(&INK))
            .draw()
            .map_err(chart_err)?;

        chart
            .draw_series(bins.iter().enumerate().map(|(i, (_, count))| {
                Rectangle::new(
                    [
                        (SegmentValue::Exact(i), 0),
                        (SegmentValue::Exact(i + 1), *count),
                    ],
                    PALETTE[1].filled(),
                )
            }))
            .map_err(chart_err)?;

        root.present().map_err(chart_err)?;
    }

    encode_png(&buffer, WIDTH, HEIGHT)
}

fn encode_png(rgb: &[u8], width: u32, height: u32) -> anyhow::Result<String> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(chart_err)?;
    Ok(BASE64.encode(png))
}

#[cfg(test)]
mod tests {
    use super::{category_share_pie_png, mean_price_bar_png, price_histogram_png};

    #[test]
    fn empty_input_renders_nothing() {
        assert_eq!(mean_price_bar_png(&[]).unwrap(), "");
        assert_eq!(category_share_pie_png(&[]).unwrap(), "");
        assert_eq!(price_histogram_png(&[]).unwrap(), "");
    }
}
