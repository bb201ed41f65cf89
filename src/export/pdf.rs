use pdf_writer::{Content, Name, Pdf, Rect, Ref};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH: f32 = 0.55;

/// Minimal multi-page table writer (A4 landscape, Helvetica).
pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,

    next_id: i32,
    font_id: Ref,

    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfManager {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        // ids are handed out manually
        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let next_id = 4;

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            current_content_id: None,

            page_w: 842.0,
            page_h: 595.0,
            margin: 40.0,
            row_h: 18.0,

            next_id,
            font_id,

            font_size: 9.0,
            header_font_size: 10.0,
            title_font_size: 14.0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    /// New page plus its content stream
    fn new_page(&mut self) -> Content {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
            .contents(content_id);

        page.resources().fonts().pair(Name(b"F1"), self.font_id);

        self.current_content_id = Some(content_id);

        Content::new()
    }

    fn finalize_page(&mut self, content: Content) {
        if let Some(id) = self.current_content_id {
            self.pdf.stream(id, &content.finish());
        }
    }

    fn build_pages_tree(&mut self) {
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
    }

    fn draw_text(&self, content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
        content.begin_text();
        content.set_font(Name(b"F1"), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(pdf_writer::Str(text.as_bytes()));
        content.end_text();
    }

    fn draw_cell_borders(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32) {
        content.save_state();
        content.set_stroke_rgb(0.65, 0.65, 0.65);
        content.rect(x, y, w, h);
        content.stroke();
        content.restore_state();
    }

    fn fill_band(&self, content: &mut Content, y: f32, width: f32, grey: f32) {
        content.save_state();
        content.set_fill_rgb(grey, grey, grey);
        content.rect(self.margin, y, width, self.row_h);
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_row(&self, content: &mut Content, y: f32, col_widths: &[f32], row: &[String], size: f32) {
        let mut x = self.margin;

        for (i, text) in row.iter().enumerate() {
            let w = col_widths[i];
            let fitted = fit_text(text, w - 8.0, size);
            self.draw_text(content, x + 4.0, y + 5.0, size, &fitted);
            self.draw_cell_borders(content, x, y, w, self.row_h);
            x += w;
        }
    }

    /// Column widths from header + content, scaled down to fit the page
    fn compute_col_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let per_char = self.font_size * AVG_GLYPH;
        let mut widths: Vec<f32> = headers
            .iter()
            .map(|h| h.chars().count() as f32 * per_char + 10.0)
            .collect();

        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count() as f32 * per_char + 10.0);
            }
        }

        let total: f32 = widths.iter().sum();
        let max = self.page_w - 2.0 * self.margin;

        if total > max {
            let scale = max / total;
            for w in &mut widths {
                *w *= scale;
            }
        }

        widths
    }

    fn draw_page_header_footer(&self, content: &mut Content, title: &str, page: usize) {
        self.draw_text(
            content,
            self.margin,
            self.page_h - self.margin + 10.0,
            self.title_font_size,
            title,
        );

        let pg = format!("Page {}", page);
        self.draw_text(
            content,
            self.page_w - self.margin - 50.0,
            self.margin - 25.0,
            self.font_size,
            &pg,
        );
    }

    /// Paginated table with a title; `footer` lines go under the last row.
    pub fn write_table(&mut self, title: &str, headers: &[&str], rows: &[Vec<String>], footer: &[String]) {
        let col_widths = self.compute_col_widths(headers, rows);
        let table_w: f32 = col_widths.iter().sum();
        let header_row: Vec<String> = headers.iter().map(|s| s.to_string()).collect();

        let mut remaining: &[Vec<String>] = rows;
        let mut page_idx = 1;

        loop {
            let mut content = self.new_page();
            self.draw_page_header_footer(&mut content, title, page_idx);

            let mut y = self.page_h - self.margin - 30.0;

            self.fill_band(&mut content, y, table_w, 0.87);
            self.draw_row(&mut content, y, &col_widths, &header_row, self.header_font_size);
            y -= self.row_h;

            let mut consumed = 0;
            for (i, row) in remaining.iter().enumerate() {
                if y - self.row_h < self.margin {
                    break;
                }

                // zebra stripe
                if i % 2 == 0 {
                    self.fill_band(&mut content, y, table_w, 0.96);
                }

                self.draw_row(&mut content, y, &col_widths, row, self.font_size);
                y -= self.row_h;
                consumed += 1;
            }
            remaining = &remaining[consumed..];

            if remaining.is_empty() {
                // Footer needs its own page when the last one is full
                let needed = footer.len() as f32 * (self.font_size + 4.0) + 10.0;
                if y - needed < self.margin && !footer.is_empty() {
                    self.finalize_page(content);
                    page_idx += 1;
                    content = self.new_page();
                    self.draw_page_header_footer(&mut content, title, page_idx);
                    y = self.page_h - self.margin - 30.0;
                }

                let mut fy = y - 6.0;
                for line in footer {
                    self.draw_text(&mut content, self.margin, fy, self.font_size, line);
                    fy -= self.font_size + 4.0;
                }

                self.finalize_page(content);
                break;
            }

            self.finalize_page(content);
            page_idx += 1;
        }
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.build_pages_tree();

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}

/// Cut `text` with "..." so it fits in `width` points.
fn fit_text(text: &str, width: f32, size: f32) -> String {
    let max_chars = (width / (size * AVG_GLYPH)).floor().max(1.0) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3).max(1);
    let mut s: String = text.chars().take(keep).collect();
    s.push_str("...");
    s
}
