/// Staff ID card
///
/// The front carries the institution band, photo and a `Label : value` grid.
/// Staff fields have no placeholder text: an empty field leaves its value
/// slot blank so the card can be completed by hand.

use super::{card_border, header_band, RenderContext, Template, CARD_SIZE};
use crate::palette::{self, GRAY_300, GRAY_700, GRAY_800, GRAY_900, WHITE};
use crate::records::{Record, StaffField, StaffRecord};
use crate::rendering::layout::{Column, TextStyle};
use crate::rendering::{Display, Face, PaintCommand};

pub const FRONT: &str = "staff-id-card-front";
pub const BACK: &str = "staff-id-card-back";

const HEADING: TextStyle = TextStyle::bold(16.0, WHITE);
const SUBHEADING: TextStyle = TextStyle::regular(12.0, WHITE);
const LABEL: TextStyle = TextStyle::bold(12.0, GRAY_800);
const VALUE: TextStyle = TextStyle::regular(12.0, GRAY_900);
const TERMS: TextStyle = TextStyle::regular(14.0, GRAY_700);
const ROW_LABEL: TextStyle = TextStyle::bold(14.0, GRAY_700);
const ROW_VALUE: TextStyle = TextStyle::regular(14.0, GRAY_900);

const DETAIL_ROWS: [(&str, StaffField); 5] = [
    ("Emp ID", StaffField::EmpId),
    ("Dept.", StaffField::Dept),
    ("Phone No.", StaffField::Phone),
    ("Address", StaffField::Address),
    ("Blood Group", StaffField::BloodGroup),
];

fn front(rec: &StaffRecord, ctx: &RenderContext) -> Face {
    let colors = palette::ORANGE;
    let mut face = Face::new(FRONT, CARD_SIZE, ctx.card_pixel_ratio);

    face.push(header_band(72, colors.gradient));
    let mut head = Column::new(12, 14, CARD_SIZE.width - 24);
    face.extend(head.centered(&ctx.institution, &HEADING));
    head.gap(2);
    face.extend(head.centered("STAFF ID CARD", &SUBHEADING));

    let photo_x = (CARD_SIZE.width as i32 - 96) / 2;
    face.push(PaintCommand::Photo {
        x: photo_x,
        y: 88,
        width: 96,
        height: 112,
        photo: rec.photo().cloned(),
    });
    face.push(PaintCommand::StrokeRect {
        x: photo_x,
        y: 88,
        width: 96,
        height: 112,
        thickness: 2,
        rgba: GRAY_300,
    });

    let mut col = Column::new(16, 216, CARD_SIZE.width - 32);
    for (label, field) in DETAIL_ROWS {
        face.extend(col.colon_row(label, rec.get(field), 80, &LABEL, &VALUE));
        col.gap(4);
    }

    face.push(PaintCommand::SolidRect {
        x: 0,
        y: CARD_SIZE.height as i32 - 16,
        width: CARD_SIZE.width,
        height: 16,
        rgba: colors.primary,
    });
    face.push(card_border(CARD_SIZE));
    face
}

fn back(_rec: &StaffRecord, ctx: &RenderContext) -> Face {
    let colors = palette::ORANGE;
    let mut face = Face::new(BACK, CARD_SIZE, ctx.card_pixel_ratio);

    face.push(header_band(64, colors.gradient));
    let mut head = Column::new(16, 20, CARD_SIZE.width - 32);
    face.extend(head.centered("TERMS AND CONDITIONS", &HEADING));

    let terms = [
        format!(
            "This ID card is the property of {} and must be returned upon termination of employment.",
            ctx.institution
        ),
        "Loss of this card should be reported immediately to the HR department.".to_string(),
    ];
    let mut col = Column::new(16, 84, CARD_SIZE.width - 32);
    for term in &terms {
        // bullet dot beside the first line
        face.push(PaintCommand::Circle {
            cx: col.x() + 3,
            cy: col.y() + 10,
            radius: 3,
            rgba: colors.primary,
        });
        let mut text_col = Column::new(col.x() + 14, col.y(), col.width() - 14);
        face.extend(text_col.paragraph(term, &TERMS));
        col.gap((text_col.y() - col.y()) as u32 + 12);
    }

    col.gap(8);
    face.extend(col.paragraph("Website", &ROW_LABEL));
    face.extend(col.paragraph(&ctx.website, &ROW_VALUE));
    face.push(card_border(CARD_SIZE));
    face
}

impl Template for StaffRecord {
    const REGIONS: &'static [&'static str] = &[FRONT, BACK];

    fn render(&self, ctx: &RenderContext) -> Display {
        let mut display = Display::new();
        display.insert(front(self, ctx));
        display.insert(back(self, ctx));
        display
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_leave_value_blank() {
        let display = StaffRecord::default().render(&RenderContext::default());
        let front = display.text_snapshot(FRONT).unwrap();
        assert_eq!(
            front.lines,
            vec![
                "Geeta University",
                "STAFF ID CARD",
                "Emp ID",
                ":",
                "Dept.",
                ":",
                "Phone No.",
                ":",
                "Address",
                ":",
                "Blood Group",
                ":",
            ]
        );
    }

    #[test]
    fn values_follow_their_labels() {
        let rec = StaffRecord::default()
            .set(StaffField::EmpId, "GU-104")
            .set(StaffField::BloodGroup, "B+");
        let front = rec.render(&RenderContext::default()).text_snapshot(FRONT).unwrap();
        let idx = front.lines.iter().position(|l| l == "Emp ID").unwrap();
        assert_eq!(front.lines[idx + 2], "GU-104");
        assert!(front.has_line("B+"));
    }

    #[test]
    fn back_names_the_institution() {
        let ctx = RenderContext {
            institution: "Northfield College".into(),
            website: "www.northfield.ac.in".into(),
            ..RenderContext::default()
        };
        let back = StaffRecord::default().render(&ctx).text_snapshot(BACK).unwrap();
        assert!(back.flat().contains("property of Northfield College and must be returned"));
        assert!(back.has_line("www.northfield.ac.in"));
    }
}
