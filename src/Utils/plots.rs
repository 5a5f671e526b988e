use crate::Utils::colormaps::{TimeColorMap, time_color_scale};
use nalgebra::DMatrix;

// padded axis range so the curve does not touch the chart walls
fn padded_range(min: f64, max: f64) -> std::ops::Range<f64> {
    let span = max - min;
    let pad = if span > 0.0 { 0.05 * span } else { 1.0 };
    (min - pad)..(max + pad)
}

fn trajectory_points(y_result: &DMatrix<f64>) -> Vec<(f64, f64, f64)> {
    (0..y_result.nrows())
        .map(|i| (y_result[(i, 0)], y_result[(i, 1)], y_result[(i, 2)]))
        .collect()
}

/// plot the whole trajectory as one single-color 3d curve and save it to png
pub fn plots3d(title: String, values: Vec<String>, y_result: DMatrix<f64>, filename: String) {
    use plotters::prelude::*;
    assert_eq!(
        y_result.ncols(),
        3,
        "3d plot needs exactly three state variables, got {:?}",
        values
    );
    let x_col = y_result.column(0);
    let y_col = y_result.column(1);
    let z_col = y_result.column(2);

    let root_area = BitMapBackend::new(&filename, (1000, 760)).into_drawing_area();
    root_area.fill(&WHITE).unwrap();

    let mut chart = ChartBuilder::on(&root_area)
        .caption(&title, ("sans-serif", 40))
        .margin(20)
        .build_cartesian_3d(
            padded_range(x_col.min(), x_col.max()),
            padded_range(y_col.min(), y_col.max()),
            padded_range(z_col.min(), z_col.max()),
        )
        .unwrap();
    chart.with_projection(|mut pb| {
        pb.yaw = 0.8;
        pb.pitch = 0.25;
        pb.scale = 0.85;
        pb.into_matrix()
    });

    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.15))
        .max_light_lines(3)
        .draw()
        .unwrap();

    let royalblue = RGBColor(65, 105, 225);
    chart
        .draw_series(LineSeries::new(trajectory_points(&y_result), &royalblue))
        .unwrap()
        .label(format!(" {}", values.join("-")))
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &royalblue));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .unwrap();

    root_area.present().unwrap();
}

/// plot the trajectory as a sequence of short segments, segment [i, i+1]
/// colored by the normalized time progression of step i, with a color bar
/// on the right, and save it to png
pub fn plots3d_multicolor(
    title: String,
    values: Vec<String>,
    y_result: DMatrix<f64>,
    colormap: TimeColorMap,
    filename: String,
) {
    use plotters::prelude::*;
    assert_eq!(
        y_result.ncols(),
        3,
        "3d plot needs exactly three state variables, got {:?}",
        values
    );
    assert!(
        y_result.nrows() >= 2,
        "multicolor plot needs at least one segment"
    );
    let num_steps = y_result.nrows() - 1;
    let x_col = y_result.column(0);
    let y_col = y_result.column(1);
    let z_col = y_result.column(2);

    let root_area = BitMapBackend::new(&filename, (1120, 760)).into_drawing_area();
    root_area.fill(&WHITE).unwrap();
    // main chart on the left, color bar strip on the right
    let (chart_area, bar_area) = root_area.split_horizontally(960);

    let mut chart = ChartBuilder::on(&chart_area)
        .caption(&title, ("sans-serif", 40))
        .margin(20)
        .build_cartesian_3d(
            padded_range(x_col.min(), x_col.max()),
            padded_range(y_col.min(), y_col.max()),
            padded_range(z_col.min(), z_col.max()),
        )
        .unwrap();
    chart.with_projection(|mut pb| {
        pb.yaw = 0.8;
        pb.pitch = 0.25;
        pb.scale = 0.85;
        pb.into_matrix()
    });

    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.15))
        .max_light_lines(3)
        .draw()
        .unwrap();

    let points = trajectory_points(&y_result);
    let scale = time_color_scale(num_steps);
    for i in 0..num_steps {
        let color = colormap.get(scale[i]);
        chart
            .draw_series(LineSeries::new(vec![points[i], points[i + 1]], &color))
            .unwrap();
    }

    draw_time_colorbar(&bar_area, colormap);
    root_area.present().unwrap();
}

// vertical gradient bar with 0.0 at the bottom and 1.0 at the top,
// the colorbar look of the reference multicolor picture
fn draw_time_colorbar(
    area: &plotters::drawing::DrawingArea<
        plotters::prelude::BitMapBackend<'_>,
        plotters::coord::Shift,
    >,
    colormap: TimeColorMap,
) {
    use plotters::prelude::*;
    let (_w, h) = area.dim_in_pixel();
    let top = 90i32;
    let bottom = h as i32 - 70;
    let bar_x0 = 40i32;
    let bar_x1 = 78i32;
    let bar_h = bottom - top;

    for row in 0..bar_h {
        let hfrac = 1.0 - row as f64 / (bar_h - 1) as f64;
        let color = colormap.get(hfrac);
        area.draw(&Rectangle::new(
            [(bar_x0, top + row), (bar_x1, top + row + 1)],
            color.filled(),
        ))
        .unwrap();
    }
    area.draw(&Rectangle::new([(bar_x0, top), (bar_x1, bottom)], &BLACK))
        .unwrap();

    area.draw(&Text::new(
        "Time progression".to_string(),
        (10, top - 40),
        ("sans-serif", 18).into_font(),
    ))
    .unwrap();
    area.draw(&Text::new(
        "1.0".to_string(),
        (bar_x1 + 8, top - 7),
        ("sans-serif", 15).into_font(),
    ))
    .unwrap();
    area.draw(&Text::new(
        "0.0".to_string(),
        (bar_x1 + 8, bottom - 7),
        ("sans-serif", 15).into_font(),
    ))
    .unwrap();
}

use gnuplot::{AxesCommon, Caption, Color, Figure, RGBString};
/// gnuplot twin of plots3d: single-color 3d curve saved to png
pub fn plots3d_gnuplot(
    title: String,
    values: Vec<String>,
    y_result: DMatrix<f64>,
    filename: String,
) {
    assert_eq!(
        y_result.ncols(),
        3,
        "3d plot needs exactly three state variables, got {:?}",
        values
    );
    let x: Vec<f64> = y_result.column(0).iter().copied().collect();
    let y: Vec<f64> = y_result.column(1).iter().copied().collect();
    let z: Vec<f64> = y_result.column(2).iter().copied().collect();

    let mut fg = Figure::new();
    fg.axes3d()
        .set_title(&title, &[])
        .set_x_label(&values[0], &[])
        .set_y_label(&values[1], &[])
        .set_z_label(&values[2], &[])
        .lines(&x, &y, &z, &[Caption("trajectory"), Color(RGBString("blue"))]);

    fg.save_to_png(&filename, 800, 600).unwrap();
}
