use std::fs;
use std::path::{Path, PathBuf};

use idforge::records::{StaffField, StaffRecord, StudentField, StudentRecord};
use idforge::rendering::{Bitmap, FontSet, Rasterizer, TextSnapshot};
use idforge::templates::{staff, student, RenderContext};
use idforge::{Record, Template};

fn golden_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("tests/goldens/expected");
    p.push(name);
    p
}

fn updating() -> bool {
    std::env::var("UPDATE_GOLDENS").is_ok()
}

fn read_golden(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        panic!(
            "unable to read golden {:?} ({}); run with UPDATE_GOLDENS=1 to create it",
            path, e
        )
    })
}

fn context() -> RenderContext {
    RenderContext {
        letter_date: "01/07/2025".into(),
        ..RenderContext::default()
    }
}

/// Compare the displayed text runs of a face with `<name>.txt`, one run per line
fn check_text_golden(name: &str, snap: &TextSnapshot) {
    let expected_path = golden_path(&format!("{}.txt", name));
    if updating() {
        fs::create_dir_all("tests/goldens/expected").ok();
        fs::write(&expected_path, format!("{}\n", snap.text())).expect("write golden");
        println!("Updated golden: {:?}", expected_path);
        return;
    }
    let exp = read_golden(&expected_path);
    let expected: Vec<&str> = exp.lines().collect();
    assert_eq!(snap.lines, expected, "{} text drifted from its golden", name);
}

fn hex_rgba(px: [u8; 4]) -> String {
    px.iter().map(|c| format!("{:02x}", c)).collect()
}

/// Compare pixels of a captured face with `<name>.pixels`. Each line holds
/// `x y rrggbbaa`; `#` starts a comment. Faces are captured without fonts so
/// the pixels do not depend on what the host has installed. Updating rewrites
/// the colours at the listed positions.
fn check_pixel_golden(name: &str, bmp: &Bitmap) {
    let expected_path = golden_path(&format!("{}.pixels", name));
    let exp = read_golden(&expected_path);

    let mut rewritten = String::new();
    let mut mismatches = Vec::new();
    let mut checked = 0;
    for line in exp.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if line.trim_start().starts_with('#') || fields.is_empty() {
            rewritten.push_str(line);
            rewritten.push('\n');
            continue;
        }
        assert_eq!(fields.len(), 3, "bad golden line {:?} in {:?}", line, expected_path);
        let x: u32 = fields[0].parse().expect("x");
        let y: u32 = fields[1].parse().expect("y");
        assert!(x < bmp.width && y < bmp.height, "({}, {}) is outside the face", x, y);
        let actual = hex_rgba(bmp.pixels.get_pixel(x, y).0);
        if actual != fields[2] {
            mismatches.push(format!("({}, {}): expected {}, got {}", x, y, fields[2], actual));
        }
        rewritten.push_str(&format!("{} {} {}\n", x, y, actual));
        checked += 1;
    }

    if updating() {
        fs::write(&expected_path, rewritten).expect("write golden");
        println!("Updated golden: {:?}", expected_path);
        return;
    }
    assert!(checked > 0, "{:?} lists no pixels", expected_path);
    assert!(
        mismatches.is_empty(),
        "{} drifted from its golden:\n{}",
        name,
        mismatches.join("\n")
    );
}

#[test]
fn golden_staff_front_matches_fixture() {
    let rec = StaffRecord::default()
        .set(StaffField::EmpId, "GU-104")
        .set(StaffField::BloodGroup, "B+");
    let display = rec.render(&context());
    check_text_golden("staff_front", &display.text_snapshot(staff::FRONT).unwrap());

    let bmp = Rasterizer::new(FontSet::empty())
        .capture(&display, staff::FRONT)
        .expect("capture");
    assert_eq!((bmp.width, bmp.height), (768, 1218));
    check_pixel_golden("staff_front", &bmp);
}

#[test]
fn golden_student_back_matches_fixture() {
    let rec = StudentRecord::default()
        .set(StudentField::Name, "Asha Rao")
        .set(StudentField::School, "GVM");
    let display = rec.render(&context());
    check_text_golden("student_back", &display.text_snapshot(student::BACK).unwrap());

    let bmp = Rasterizer::new(FontSet::empty())
        .capture(&display, student::BACK)
        .expect("capture");
    check_pixel_golden("student_back", &bmp);
}

#[test]
fn same_record_rasterizes_identically() {
    let rec = StudentRecord::default().set(StudentField::School, "DPS");
    let r = Rasterizer::new(FontSet::empty());
    let a = r.capture(&rec.render(&context()), student::FRONT).unwrap();
    let b = r.capture(&rec.render(&context()), student::FRONT).unwrap();
    assert_eq!(a.pixels.as_raw(), b.pixels.as_raw());
}
