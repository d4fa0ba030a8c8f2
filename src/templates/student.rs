/// Student ID card: school-coloured front with photo and details, terms on the back

use super::{card_border, header_band, or_placeholder, RenderContext, Template, CARD_SIZE};
use crate::palette::{self, GRAY_200, GRAY_300, GRAY_700, GRAY_900, WHITE};
use crate::records::{Record, StudentField, StudentRecord};
use crate::rendering::layout::{Column, TextStyle};
use crate::rendering::{Display, Face, PaintCommand};

pub const FRONT: &str = "student-id-card-front";
pub const BACK: &str = "student-id-card-back";

const HEADING: TextStyle = TextStyle::bold(16.0, WHITE);
const SUBHEADING: TextStyle = TextStyle::regular(14.0, WHITE);
const LABEL: TextStyle = TextStyle::bold(14.0, GRAY_700);
const VALUE: TextStyle = TextStyle::regular(14.0, GRAY_900);
const TERMS: TextStyle = TextStyle::regular(14.0, GRAY_700);
const FOOTER: TextStyle = TextStyle::regular(12.0, WHITE);

/// Address line printed in the front footer
pub const SCHOOL_ADDRESS: &str = "School address: Street, State, 1234";

/// Mail shown on the back: lowercased name with its first space turned into
/// a dot
pub fn student_mail(name: &str) -> String {
    if name.is_empty() {
        "student@school.edu".to_string()
    } else {
        format!("{}@school.edu", name.to_lowercase().replacen(' ', ".", 1))
    }
}

pub fn school_website(school: &str) -> String {
    let school = school.to_lowercase();
    format!("www.{}.edu.in", or_placeholder(&school, "school"))
}

fn front(rec: &StudentRecord, ctx: &RenderContext) -> Face {
    let colors = palette::for_school(rec.get(StudentField::School));
    let mut face = Face::new(FRONT, CARD_SIZE, ctx.card_pixel_ratio);
    let w = CARD_SIZE.width as i32;

    face.push(header_band(80, colors.gradient));
    let mut head = Column::new(16, 12, CARD_SIZE.width - 32);
    face.extend(head.centered(or_placeholder(rec.get(StudentField::School), "SCHOOL NAME"), &HEADING));
    face.extend(head.centered("STUDENT ID CARD", &SUBHEADING));
    // diagonal cut across the bottom of the header
    face.push(PaintCommand::Triangle {
        points: [(0, 80), (w, 56), (w, 80)],
        rgba: WHITE,
    });

    let photo_x = (w - 96) / 2;
    face.push(PaintCommand::Photo {
        x: photo_x,
        y: 104,
        width: 96,
        height: 112,
        photo: rec.photo().cloned(),
    });
    face.push(PaintCommand::StrokeRect {
        x: photo_x,
        y: 104,
        width: 96,
        height: 112,
        thickness: 2,
        rgba: GRAY_300,
    });

    let mut col = Column::new(16, 232, CARD_SIZE.width - 32);
    let class_line = format!(
        "{} - {}",
        or_placeholder(rec.get(StudentField::Class), "Class Here"),
        or_placeholder(rec.get(StudentField::Section), "A")
    );
    let rows = [
        ("Student Name", or_placeholder(rec.get(StudentField::Name), "Name Here")),
        ("Session", or_placeholder(rec.get(StudentField::Session), "2024-25")),
        ("Class", class_line.as_str()),
        (
            "Emergency Call",
            or_placeholder(rec.get(StudentField::EmergencyContact), "123-456-7890"),
        ),
    ];
    for (label, value) in rows {
        face.extend(col.spread_row(label, value, &LABEL, &VALUE));
        col.gap(8);
    }

    let footer_y = CARD_SIZE.height as i32 - 24;
    face.push(PaintCommand::SolidRect {
        x: 0,
        y: footer_y,
        width: CARD_SIZE.width,
        height: 24,
        rgba: colors.primary,
    });
    let mut foot = Column::new(8, footer_y + 5, CARD_SIZE.width - 16);
    face.extend(foot.centered(SCHOOL_ADDRESS, &FOOTER));
    face.push(card_border(CARD_SIZE));
    face
}

fn back(rec: &StudentRecord, ctx: &RenderContext) -> Face {
    let colors = palette::for_school(rec.get(StudentField::School));
    let mut face = Face::new(BACK, CARD_SIZE, ctx.card_pixel_ratio);

    face.push(header_band(64, colors.gradient));
    let mut head = Column::new(16, 20, CARD_SIZE.width - 32);
    face.extend(head.centered("TERMS AND CONDITIONS", &HEADING));

    let mut col = Column::new(16, 80, CARD_SIZE.width - 32);
    face.extend(col.paragraph(
        "• This ID card is the property of the school and must be returned upon leaving the institution.",
        &TERMS,
    ));
    col.gap(12);
    face.extend(col.paragraph(
        "• Loss of this card should be reported immediately to the school administration.",
        &TERMS,
    ));
    col.gap(16);
    face.push(PaintCommand::SolidRect {
        x: col.x(),
        y: col.y(),
        width: col.width(),
        height: 1,
        rgba: GRAY_200,
    });
    col.gap(16);

    let session = or_placeholder(rec.get(StudentField::Session), "2024-25");
    let mail = student_mail(rec.get(StudentField::Name));
    let website = school_website(rec.get(StudentField::School));
    for (label, value) in [("Mail", mail.as_str()), ("Website", website.as_str()), ("Session:", session)] {
        face.extend(col.spread_row(label, value, &LABEL, &VALUE));
        col.gap(8);
    }
    face.push(card_border(CARD_SIZE));
    face
}

impl Template for StudentRecord {
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

    fn render(rec: &StudentRecord) -> Display {
        rec.render(&RenderContext::default())
    }

    #[test]
    fn empty_record_shows_placeholders() {
        let display = render(&StudentRecord::default());
        let front = display.text_snapshot(FRONT).unwrap();
        for expected in ["SCHOOL NAME", "Name Here", "2024-25", "Class Here - A", "123-456-7890"] {
            assert!(front.has_line(expected), "missing {:?} in {:?}", expected, front.lines);
        }
        let back = display.text_snapshot(BACK).unwrap();
        assert!(back.has_line("student@school.edu"));
        assert!(back.has_line("www.school.edu.in"));
    }

    #[test]
    fn edits_replace_placeholders_exactly() {
        let rec = StudentRecord::default()
            .set(StudentField::Name, "Asha Rao")
            .set(StudentField::Class, "IX")
            .set(StudentField::School, "DPS");
        let display = render(&rec);
        let front = display.text_snapshot(FRONT).unwrap();
        assert!(front.has_line("Asha Rao"));
        assert!(front.has_line("IX - A"));
        assert!(front.has_line("DPS"));
        assert!(!front.has_line("Name Here"));
        let back = display.text_snapshot(BACK).unwrap();
        assert!(back.has_line("asha.rao@school.edu"));
        assert!(back.has_line("www.dps.edu.in"));
    }

    #[test]
    fn header_uses_school_palette() {
        let rec = StudentRecord::default().set(StudentField::School, "DPS");
        let display = render(&rec);
        let face = display.get(FRONT).unwrap();
        match &face.commands[0] {
            PaintCommand::Gradient { from, .. } => assert_eq!(*from, palette::RED.gradient.0),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn mail_replaces_only_first_space() {
        assert_eq!(student_mail("Asha Devi Rao"), "asha.devi rao@school.edu");
        assert_eq!(student_mail(""), "student@school.edu");
        assert_eq!(school_website("GVMPS"), "www.gvmps.edu.in");
    }
}
