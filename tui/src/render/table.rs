//! The listings table: one column allocation shared by the header and every
//! row, so they always line up.

use anuncios_utils_string::clamp_lines;
use anuncios_utils_string::flatten_control_chars;
use anuncios_utils_string::truncate_at_word;
use anuncios_utils_string::truncate_to_width;
use ratatui::buffer::Buffer;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;
use url::Url;

use crate::listing::ListingRecord;
use crate::listing::row_key;
use crate::style::StyleFragment;
use crate::viewport::ROW_HEIGHT;
use crate::viewport::Viewport;

pub const EMPTY_PLACEHOLDER: &str = "No listings to display.";

/// Header line plus the rule under it.
pub const HEADER_HEIGHT: u16 = 2;
pub const COLUMN_SPACING: u16 = 1;
const DESCRIPTION_LINES: usize = ROW_HEIGHT as usize;
const NO_IMAGE: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    pub weight: u16,
    pub align: Align,
}

const fn column(title: &'static str, weight: u16, align: Align) -> Column {
    Column {
        title,
        weight,
        align,
    }
}

/// ID, image, name, category, description, price.
pub const COLUMNS: [Column; 6] = [
    column("ID", 1, Align::Left),
    column("Image", 2, Align::Left),
    column("Name", 3, Align::Left),
    column("Category", 2, Align::Left),
    column("Description", 4, Align::Left),
    column("Price", 2, Align::Right),
];

/// Split `area` horizontally into the six column slots.
pub fn column_areas(area: Rect) -> [Rect; 6] {
    Layout::horizontal(COLUMNS.map(|c| Constraint::Fill(c.weight)))
        .spacing(COLUMN_SPACING)
        .areas(area)
}

/// `$` plus exactly two decimals.
pub fn format_price(price: f64) -> String {
    let price = if price.is_finite() && price > 0.0 {
        price
    } else {
        0.0
    };
    format!("${price:.2}")
}

/// Host and path of the image URL, or `-`. The image itself is never loaded.
pub fn image_label(image_url: Option<&str>) -> String {
    let Some(url) = image_url.and_then(|raw| Url::parse(raw).ok()) else {
        return NO_IMAGE.to_string();
    };
    match url.host_str() {
        Some(host) if url.path() == "/" => host.to_string(),
        Some(host) => format!("{host}{}", url.path()),
        None => NO_IMAGE.to_string(),
    }
}

/// Untruncated cell text for one row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowModel {
    pub key: String,
    pub id: String,
    pub image: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: String,
}

impl RowModel {
    /// A missing record yields a fully defaulted row keyed by `index`.
    pub fn new(index: usize, record: Option<&ListingRecord>) -> Self {
        let key = row_key(index, record);
        match record {
            Some(record) => Self {
                key,
                id: record.id.display(),
                image: image_label(record.image_url.as_deref()),
                name: flatten_control_chars(&record.name).into_owned(),
                category: flatten_control_chars(&record.category).into_owned(),
                description: flatten_control_chars(&record.description).into_owned(),
                price: format_price(record.price),
            },
            None => Self {
                key,
                id: String::new(),
                image: NO_IMAGE.to_string(),
                name: String::new(),
                category: String::new(),
                description: String::new(),
                price: format_price(0.0),
            },
        }
    }

    /// Fit every cell to its column width. Each entry holds the lines for
    /// one column, in [`COLUMNS`] order.
    pub fn fit(&self, widths: [usize; 6], soft_wrap: bool) -> [Vec<String>; 6] {
        let one_line = |text: &str, width: usize| vec![truncate_to_width(text, width).into_owned()];
        let category = if soft_wrap {
            truncate_to_width(&self.category, widths[3])
        } else {
            truncate_at_word(&self.category, widths[3])
        };
        [
            one_line(&self.id, widths[0]),
            one_line(&self.image, widths[1]),
            one_line(&self.name, widths[2]),
            vec![category.into_owned()],
            clamp_lines(&self.description, widths[4], DESCRIPTION_LINES, soft_wrap),
            one_line(&self.price, widths[5]),
        ]
    }
}

/// Paint `text` into the first line of `area` with the column's alignment.
fn put(buf: &mut Buffer, area: Rect, line_offset: u16, text: &str, align: Align, style: Style) {
    if area.is_empty() || line_offset >= area.height || text.is_empty() {
        return;
    }
    let x = match align {
        Align::Left => area.x,
        Align::Right => {
            let used = (text.width() as u16).min(area.width);
            area.x + area.width - used
        }
    };
    buf.set_stringn(x, area.y + line_offset, text, area.width as usize, style);
}

pub fn render_header(area: Rect, buf: &mut Buffer, style: &StyleFragment) {
    if area.is_empty() {
        return;
    }
    let title_row = Rect { height: 1, ..area };
    for (slot, column) in column_areas(title_row).iter().zip(COLUMNS) {
        put(buf, *slot, 0, column.title, column.align, style.header);
    }
    if area.height > 1 {
        let rule = "─".repeat(area.width as usize);
        buf.set_stringn(area.x, area.y + 1, rule, area.width as usize, style.muted);
    }
}

/// One table row, drawn into a [`ROW_HEIGHT`]-line area.
pub struct RowWidget<'a> {
    pub model: &'a RowModel,
    pub selected: bool,
    pub style: &'a StyleFragment,
}

impl Widget for RowWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        if self.selected {
            buf.set_style(area, self.style.selected);
        }
        let slots = column_areas(area);
        let widths = slots.map(|slot| slot.width as usize);
        let cells = self.model.fit(widths, self.style.soft_wrap);
        for (i, ((slot, column), lines)) in slots.iter().zip(COLUMNS).zip(cells).enumerate() {
            let base = match i {
                0 | 4 => self.style.muted,
                5 => self.style.price,
                _ => self.style.cell,
            };
            let cell_style = if self.selected {
                base.patch(self.style.selected)
            } else {
                base
            };
            for (offset, line) in lines.iter().enumerate() {
                put(buf, *slot, offset as u16, line, column.align, cell_style);
            }
        }
    }
}

/// Draw header, rule and the visible window of rows. Updates the viewport's
/// visible row count to match `area`.
pub fn render_table(
    area: Rect,
    buf: &mut Buffer,
    records: &[ListingRecord],
    viewport: &mut Viewport,
    style: &StyleFragment,
) {
    let [header_area, body_area] =
        Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)]).areas(area);
    render_header(header_area, buf, style);

    if records.is_empty() {
        viewport.set_view_rows(0);
        if !body_area.is_empty() {
            Line::styled(EMPTY_PLACEHOLDER, style.muted)
                .centered()
                .render(Rect { height: 1, ..body_area }, buf);
        }
        return;
    }

    viewport.set_view_rows((body_area.height / ROW_HEIGHT) as usize);
    let selected = viewport.selected();
    for (slot, index) in viewport.window().enumerate() {
        let y = body_area.y + slot as u16 * ROW_HEIGHT;
        let row_area = Rect::new(body_area.x, y, body_area.width, ROW_HEIGHT);
        let model = RowModel::new(index, records.get(index));
        RowWidget {
            model: &model,
            selected: selected == Some(index),
            style,
        }
        .render(row_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::RecordId;
    use crate::style::Platform;
    use crate::style::style_for;
    use pretty_assertions::assert_eq;

    fn bici() -> ListingRecord {
        ListingRecord {
            id: RecordId::Int(1),
            name: "Bici".to_string(),
            category: "Deporte".to_string(),
            description: "desc".to_string(),
            price: 199.5,
            image_url: Some("http://x/1.png".to_string()),
        }
    }

    fn line(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
    }

    #[test]
    fn price_has_two_decimals() {
        assert_eq!(format_price(199.5), "$199.50");
        assert_eq!(format_price(0.0), "$0.00");
        assert_eq!(format_price(3.14159), "$3.14");
        assert_eq!(format_price(f64::NAN), "$0.00");
    }

    #[test]
    fn image_label_shows_host_and_path() {
        assert_eq!(image_label(Some("http://x/1.png")), "x/1.png");
        assert_eq!(image_label(Some("https://cdn.example.com/")), "cdn.example.com");
        assert_eq!(image_label(None), "-");
        assert_eq!(image_label(Some("not a url")), "-");
    }

    #[test]
    fn missing_record_is_defaulted_row() {
        let model = RowModel::new(3, None);
        assert_eq!(model.key, "3");
        assert_eq!(model.price, "$0.00");
        assert_eq!(model.image, "-");
        assert_eq!(model.name, "");
    }

    #[test]
    fn positional_record_keys_by_index_with_blank_id() {
        let record = ListingRecord::empty(RecordId::Position(4));
        let model = RowModel::new(4, Some(&record));
        assert_eq!(model.key, "4");
        assert_eq!(model.id, "");
    }

    #[test]
    fn column_allocation_follows_weights() {
        let areas = column_areas(Rect::new(0, 0, 74, 1));
        let widths: Vec<u16> = areas.iter().map(|a| a.width).collect();

        assert_eq!(areas[0].x, 0);
        assert_eq!(areas[5].right(), 74);
        assert_eq!(areas[1].x, areas[0].right() + COLUMN_SPACING);
        assert!(widths[4] > widths[2] && widths[2] > widths[1] && widths[1] > widths[0]);
    }

    #[test]
    fn fit_truncates_single_line_cells() {
        let mut model = RowModel::new(0, Some(&bici()));
        model.name = "Bicicleta de montaña".to_string();

        let cells = model.fit([4, 8, 8, 8, 10, 8], true);

        assert_eq!(cells[2], vec!["Bicicle…".to_string()]);
        assert_eq!(cells[5], vec!["$199.50".to_string()]);
    }

    #[test]
    fn soft_wrap_controls_mid_token_breaks() {
        let mut model = RowModel::new(0, Some(&bici()));
        model.description = "Supercalifragilistic".to_string();
        model.category = "Ropa deportiva".to_string();

        let wrapped = model.fit([4, 8, 8, 8, 8, 8], true);
        let unwrapped = model.fit([4, 8, 8, 8, 8, 8], false);

        assert_eq!(wrapped[4], vec!["Supercal".to_string(), "ifragil…".to_string()]);
        assert_eq!(unwrapped[4], vec!["Superca…".to_string()]);
        assert_eq!(wrapped[3], vec!["Ropa de…".to_string()]);
        assert_eq!(unwrapped[3], vec!["Ropa…".to_string()]);
    }

    #[test]
    fn header_and_rows_share_column_edges() {
        let area = Rect::new(0, 0, 100, 6);
        let mut buf = Buffer::empty(area);
        let mut viewport = Viewport::new();
        viewport.reconcile(vec!["1".to_string()]);
        let style = style_for(Platform::Terminal);

        render_table(area, &mut buf, &[bici()], &mut viewport, &style);

        let header = line(&buf, 0);
        let row = line(&buf, 2);
        assert_eq!(header.find("Name"), row.find("Bici"));
        assert_eq!(header.find("Category"), row.find("Deporte"));
        assert_eq!(
            header.rfind("Price").map(|i| i + "Price".len()),
            row.rfind("$199.50").map(|i| i + "$199.50".len())
        );
    }

    #[test]
    fn only_visible_rows_are_drawn() {
        let records: Vec<ListingRecord> = (0..50)
            .map(|i| ListingRecord {
                name: format!("item-{i}"),
                ..ListingRecord::empty(RecordId::Int(i))
            })
            .collect();
        let area = Rect::new(0, 0, 80, 8);
        let mut buf = Buffer::empty(area);
        let mut viewport = Viewport::new();
        viewport.reconcile(records.iter().map(|r| r.id.key()).collect());
        let style = style_for(Platform::Terminal);

        render_table(area, &mut buf, &records, &mut viewport, &style);

        assert_eq!(viewport.view_rows(), 3);
        assert_eq!(viewport.window(), 0..3);
        let text: String = (0..8).map(|y| line(&buf, y)).collect();
        assert!(text.contains("item-2"));
        assert!(!text.contains("item-3"));
    }

    #[test]
    fn empty_records_show_generic_placeholder() {
        let area = Rect::new(0, 0, 60, 5);
        let mut buf = Buffer::empty(area);
        let mut viewport = Viewport::new();

        render_table(area, &mut buf, &[], &mut viewport, &style_for(Platform::Web));

        assert!(line(&buf, 0).contains("Description"));
        assert!(line(&buf, 2).contains(EMPTY_PLACEHOLDER));
    }
}
