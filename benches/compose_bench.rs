use criterion::{criterion_group, criterion_main, Criterion};
use idforge::compose::{compose, PageLayout};
use idforge::records::{OnboardingRecord, StudentField, StudentRecord};
use idforge::rendering::{FontSet, Rasterizer};
use idforge::templates::{student, welcome, RenderContext, Template};
use idforge::Record;

fn bench_capture_card(c: &mut Criterion) {
    let rasterizer = Rasterizer::new(FontSet::empty());
    let rec = StudentRecord::default()
        .set(StudentField::Name, "Asha Rao")
        .set(StudentField::School, "DPS");
    let display = rec.render(&RenderContext::default());

    c.bench_function("capture_student_front", |b| {
        b.iter(|| {
            let _ = rasterizer.capture(&display, student::FRONT).unwrap();
        })
    });
}

fn bench_compose(c: &mut Criterion) {
    let rasterizer = Rasterizer::new(FontSet::empty());
    let ctx = RenderContext::default();

    let display = StudentRecord::default().render(&ctx);
    let cards = [
        rasterizer.capture(&display, student::FRONT).unwrap(),
        rasterizer.capture(&display, student::BACK).unwrap(),
    ];
    c.bench_function("compose_id_cards", |b| {
        b.iter(|| {
            let _ = compose(&cards, &PageLayout::id_cards()).unwrap();
        })
    });

    let display = OnboardingRecord::default().render(&ctx);
    let letter = [rasterizer.capture(&display, welcome::LETTER).unwrap()];
    c.bench_function("compose_letter", |b| {
        b.iter(|| {
            let _ = compose(&letter, &PageLayout::letter()).unwrap();
        })
    });
}

criterion_group!(benches, bench_capture_card, bench_compose);
criterion_main!(benches);
