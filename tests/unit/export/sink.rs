use super::*;

fn frame() -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data: vec![255, 0, 0, 255, 0, 0, 0, 0],
        premultiplied: true,
    }
}

#[test]
fn in_memory_sink_captures_config_and_frames() {
    let mut sink = InMemorySink::new();
    sink.begin(SinkConfig {
        width: 2,
        height: 1,
        fps: 30,
    })
    .unwrap();
    sink.push_frame(0, &frame()).unwrap();
    sink.push_frame(1, &frame()).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.config().map(|c| c.fps), Some(30));
    assert_eq!(sink.frames().len(), 2);
    assert_eq!(sink.frames()[1].0, 1);
    assert!(sink.ended());
}

#[test]
fn png_sequence_names_frames_by_index() {
    let dir = std::env::temp_dir().join(format!("spreadviz-sink-{}", std::process::id()));
    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(SinkConfig {
        width: 2,
        height: 1,
        fps: 10,
    })
    .unwrap();
    sink.push_frame(7, &frame()).unwrap();
    sink.end().unwrap();

    let path = dir.join("frame_00007.png");
    assert_eq!(sink.written(), &[path.clone()]);
    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
    let _ = std::fs::remove_dir_all(&dir);
}
