use criterion::{black_box, criterion_group, criterion_main, Criterion};
use weather_exporter::WeatherReading;

const MINIMAL: &str = r#"{"current_weather":{"temperature":25.5,"windspeed":12.3,"winddirection":180,"is_day":1,"weathercode":0}}"#;

const FULL: &str = r#"{
    "latitude": 52.52,
    "longitude": 13.419998,
    "generationtime_ms": 0.0510215759277343,
    "utc_offset_seconds": 0,
    "timezone": "GMT",
    "timezone_abbreviation": "GMT",
    "elevation": 38.0,
    "current_weather_units": {
        "time": "iso8601",
        "interval": "seconds",
        "temperature": "C",
        "windspeed": "km/h",
        "winddirection": "deg",
        "is_day": "",
        "weathercode": "wmo code"
    },
    "current_weather": {
        "time": "2024-05-01T12:00",
        "interval": 900,
        "temperature": 18.4,
        "windspeed": 9.7,
        "winddirection": 246,
        "is_day": 1,
        "weathercode": 3
    }
}"#;

fn bench_decode(c: &mut Criterion) {
    c.bench_function("decode_minimal", |b| {
        b.iter(|| WeatherReading::from_json(black_box(MINIMAL.as_bytes())))
    });
    c.bench_function("decode_full", |b| {
        b.iter(|| WeatherReading::from_json(black_box(FULL.as_bytes())))
    });
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
