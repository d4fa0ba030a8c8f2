/// Onboarding welcome letter

use super::{or_placeholder, RenderContext, Template, LETTER_MIN_HEIGHT, LETTER_WIDTH};
use crate::palette::{BLUE_50, BLUE_600, BLUE_800, GRAY_200, GRAY_600, GRAY_700, GRAY_800, WHITE};
use crate::records::{OnboardingField, OnboardingRecord, Record};
use crate::rendering::layout::{Column, TextStyle};
use crate::rendering::{Display, Face, PaintCommand, Size};

pub const LETTER: &str = "welcome-mail";

const PADDING: u32 = 32;

const TITLE: TextStyle = TextStyle::bold(24.0, BLUE_600);
const DEPARTMENT: TextStyle = TextStyle::regular(16.0, GRAY_600);
const SALUTATION: TextStyle = TextStyle::bold(16.0, GRAY_800);
const BODY: TextStyle = TextStyle::regular(16.0, GRAY_700);
const BOX_TITLE: TextStyle = TextStyle::bold(16.0, BLUE_800);
const SMALL: TextStyle = TextStyle::regular(14.0, GRAY_700);
const SMALL_BOLD: TextStyle = TextStyle::bold(14.0, GRAY_700);
const SIGN_OFF: TextStyle = TextStyle::bold(16.0, GRAY_800);
const SIGN_OFF_DEPT: TextStyle = TextStyle::bold(16.0, BLUE_600);
const SIGN_OFF_ORG: TextStyle = TextStyle::regular(14.0, GRAY_600);

const DOCUMENTS: [&str; 5] = [
    "Original and photocopies of educational certificates",
    "Previous employment letters (if applicable)",
    "Identity proof (Aadhar/PAN/Passport)",
    "Address proof",
    "Recent passport-size photographs",
];

fn letter(rec: &OnboardingRecord, ctx: &RenderContext) -> Face {
    let field = |f: OnboardingField, placeholder: &'static str| -> String {
        or_placeholder(rec.get(f), placeholder).to_string()
    };
    let name = field(OnboardingField::EmployeeName, "[Employee Name]");
    let position = field(OnboardingField::Position, "[Position]");
    let department = field(OnboardingField::Department, "[Department]");
    let start_date = field(OnboardingField::StartDate, "[Start Date]");

    let mut cmds: Vec<PaintCommand> = Vec::new();
    let content_width = LETTER_WIDTH - PADDING * 2;
    let mut col = Column::new(PADDING as i32, PADDING as i32, content_width);

    // logo badge
    let cx = (LETTER_WIDTH / 2) as i32;
    cmds.push(PaintCommand::Circle {
        cx,
        cy: col.y() + 32,
        radius: 32,
        rgba: BLUE_600,
    });
    cmds.push(PaintCommand::StrokeRect {
        x: cx - 10,
        y: col.y() + 20,
        width: 20,
        height: 24,
        thickness: 2,
        rgba: WHITE,
    });
    col.gap(64 + 16);
    cmds.extend(col.centered(&ctx.institution, &TITLE));
    col.gap(8);
    cmds.extend(col.centered("Human Resources Department", &DEPARTMENT));
    col.gap(32);

    cmds.extend(col.paragraph(&format!("Date: {}", ctx.letter_date), &DEPARTMENT));
    col.gap(16);
    cmds.extend(col.paragraph(&format!("Dear {},", name), &SALUTATION));
    col.gap(24);

    cmds.extend(col.paragraph(
        &format!(
            "We are delighted to welcome you to {}! We are excited to have you join our team as a {} in the {} department.",
            ctx.institution, position, department
        ),
        &BODY,
    ));
    col.gap(16);
    cmds.extend(col.paragraph(
        &format!(
            "Your first day of work will be on {}. Please report to the HR department at 9:00 AM for your orientation and onboarding process.",
            start_date
        ),
        &BODY,
    ));
    col.gap(16);

    // details box: content first, then the background slotted in beneath it
    let box_top = col.y();
    let background_at = cmds.len();
    let mut inner = Column::new(col.x() + 16, box_top + 16, content_width - 32);
    cmds.extend(inner.paragraph("Important Details:", &BOX_TITLE));
    inner.gap(8);
    let details = [
        ("Reporting Manager:", field(OnboardingField::ReportingManager, "[Manager Name]")),
        ("Work Location:", field(OnboardingField::WorkLocation, "[Location]")),
        ("Email:", field(OnboardingField::Email, "[Email Address]")),
        ("HR Contact:", field(OnboardingField::HrContact, "[HR Contact]")),
    ];
    for (label, value) in &details {
        cmds.extend(inner.inline_pair(label, value, &SMALL_BOLD, &SMALL, 0));
        inner.gap(4);
    }
    let box_height = (inner.y() + 12 - box_top) as u32;
    cmds.insert(
        background_at,
        PaintCommand::SolidRect {
            x: col.x(),
            y: box_top,
            width: content_width,
            height: box_height,
            rgba: BLUE_50,
        },
    );
    col.gap(box_height + 16);

    cmds.extend(col.paragraph("Please bring the following documents on your first day:", &BODY));
    col.gap(8);
    for doc in DOCUMENTS {
        cmds.extend(col.paragraph_indented(&format!("• {}", doc), &SMALL, 16));
        col.gap(4);
    }
    col.gap(12);
    cmds.extend(col.paragraph(
        "We look forward to working with you and are confident that you will be a valuable addition to our team.",
        &BODY,
    ));
    col.gap(24);
    cmds.extend(col.paragraph("Welcome aboard!", &BODY));
    col.gap(32);

    cmds.push(PaintCommand::SolidRect {
        x: col.x(),
        y: col.y(),
        width: content_width,
        height: 1,
        rgba: GRAY_200,
    });
    col.gap(16);
    cmds.extend(col.paragraph("Best regards,", &SIGN_OFF));
    cmds.extend(col.paragraph("Human Resources Department", &SIGN_OFF_DEPT));
    cmds.extend(col.paragraph(&ctx.institution, &SIGN_OFF_ORG));

    let height = (col.y() as u32 + PADDING).max(LETTER_MIN_HEIGHT);
    let size = Size {
        width: LETTER_WIDTH,
        height,
    };
    let mut face = Face::new(LETTER, size, ctx.letter_pixel_ratio);
    face.extend(cmds);
    face.push(super::card_border(size));
    face
}

impl Template for OnboardingRecord {
    const REGIONS: &'static [&'static str] = &[LETTER];

    fn render(&self, ctx: &RenderContext) -> Display {
        let mut display = Display::new();
        display.insert(letter(self, ctx));
        display
    }
}
