use idforge::records::{OnboardingRecord, StaffRecord, StudentField, StudentRecord};
use idforge::rendering::{FontSet, Rasterizer};
use idforge::templates::{student, welcome, RenderContext, Template, CARD_SIZE, LETTER_WIDTH};
use idforge::{palette, Record};

#[test]
fn smoke_card_faces_capture_at_three_x() {
    let r = Rasterizer::new(FontSet::empty());
    let ctx = RenderContext::default();
    let display = StaffRecord::default().render(&ctx);
    for region in StaffRecord::REGIONS {
        let bmp = r.capture(&display, region).unwrap();
        assert_eq!(bmp.width, CARD_SIZE.width * 3);
        assert_eq!(bmp.height, CARD_SIZE.height * 3);
    }
}

#[test]
fn smoke_letter_captures_at_its_own_ratio() {
    let r = Rasterizer::new(FontSet::empty());
    let display = OnboardingRecord::default().render(&RenderContext::default());
    let face = display.get(welcome::LETTER).unwrap();
    let bmp = r.capture(&display, welcome::LETTER).unwrap();
    assert_eq!(bmp.width, (LETTER_WIDTH as f32 * 1.2).round() as u32);
    assert_eq!(bmp.height, (face.size.height as f32 * 1.2).round() as u32);
    assert_eq!(&bmp.to_png().unwrap()[0..4], b"\x89PNG");
}

#[test]
fn smoke_header_pixel_takes_school_colour() {
    let r = Rasterizer::new(FontSet::empty());
    let rec = StudentRecord::default().set(StudentField::School, "Lakshay");
    let bmp = r
        .capture(&rec.render(&RenderContext::default()), student::FRONT)
        .unwrap();
    // just inside the border the gradient is still at its first stop
    let (cr, cg, cb, _) = palette::GREEN.gradient.0;
    let [r0, g0, b0, _] = bmp.pixels.get_pixel(3, 3).0;
    let near = |a: u8, b: u8| (a as i16 - b as i16).abs() <= 2;
    assert!(near(r0, cr) && near(g0, cg) && near(b0, cb), "got {:?}", (r0, g0, b0));
    assert_eq!(rec.file_name(), "Student_ID_Card.pdf");
}
