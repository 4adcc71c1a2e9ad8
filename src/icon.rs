use eframe::egui::viewport::IconData;

// App icon: a rounded screen with a vertical crimson gradient and a play
// triangle cut out of it.
pub fn generate_icon(size: u32) -> IconData {
    let s = size as f32;
    let mut rgba = vec![0u8; (size * size * 4) as usize];

    let inset = s * 0.08;
    let corner = s * 0.18;
    let tri = [(s * 0.40, s * 0.30), (s * 0.40, s * 0.70), (s * 0.72, s * 0.50)];

    for y in 0..size {
        for x in 0..size {
            let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
            if !in_rounded_rect(px, py, inset, s - inset, corner) {
                continue;
            }
            let t = (py - inset) / (s - 2.0 * inset);
            let mut pixel = [mix(226.0, 120.0, t), mix(48.0, 16.0, t), mix(64.0, 40.0, t), 255.0];
            if in_triangle((px, py), tri) {
                pixel = [250.0, 246.0, 240.0, 255.0];
            }
            let idx = ((y * size + x) * 4) as usize;
            for (c, v) in pixel.iter().enumerate() {
                rgba[idx + c] = *v as u8;
            }
        }
    }

    IconData { rgba, width: size, height: size }
}

fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

fn in_rounded_rect(px: f32, py: f32, lo: f32, hi: f32, r: f32) -> bool {
    if px < lo || py < lo || px > hi || py > hi {
        return false;
    }
    // distance to the nearest corner centre, only relevant inside a corner box
    let cx = px.clamp(lo + r, hi - r);
    let cy = py.clamp(lo + r, hi - r);
    let (dx, dy) = (px - cx, py - cy);
    dx * dx + dy * dy <= r * r
}

fn in_triangle(p: (f32, f32), tri: [(f32, f32); 3]) -> bool {
    let edge = |a: (f32, f32), b: (f32, f32)| (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0);
    let d = [edge(tri[0], tri[1]), edge(tri[1], tri[2]), edge(tri[2], tri[0])];
    d.iter().all(|v| *v >= 0.0) || d.iter().all(|v| *v <= 0.0)
}
