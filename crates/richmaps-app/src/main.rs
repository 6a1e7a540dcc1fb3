//! Render a JSON scene to a PNG overlay image.

use richmaps_app::{AppError, AppResult, Scene, render_scene, write_overlay_png};

fn run() -> AppResult<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [scene_path, out_path] = args.as_slice() else {
        return Err(AppError::Usage("richmaps <scene.json> <out.png>".to_string()));
    };

    let scene = Scene::load(scene_path)?;
    let overlay = render_scene(scene)?;
    write_overlay_png(&overlay, out_path)
}

fn main() {
    env_logger::init();
    log::info!("Starting RichMaps");

    if let Err(e) = run() {
        log::error!("{e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
