use smallvec::SmallVec;
use tabled::{
    Table,
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{Color, Style, Theme, object::Rows},
};

/// Per-cell colors as `(row, column, color)`, rows counted from the header.
pub(crate) type CellColors = SmallVec<[(usize, usize, Color); 16]>;

pub(crate) fn render<I, R>(header: R, rows: I, colors: CellColors) -> Table
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = String>,
{
    let mut builder = Builder::default();

    builder.push_record(header);

    for row in rows {
        builder.push_record(row);
    }

    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);

    for (row, column, color) in colors {
        table.modify((row, column), color);
    }

    table
}

pub(crate) fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}
