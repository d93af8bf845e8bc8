use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::ForceGraphState;

const BACKGROUND: &str = "#ffffff";
const NODE_STROKE: &str = "#ffffff";
const NODE_STROKE_WIDTH: f64 = 1.5;
const LABEL_COLOR: &str = "#333333";
const LABEL_FONT: &str = "10px sans-serif";
const LABEL_DX: f64 = 12.0;
const LABEL_DY: f64 = 3.5;

/// Draw one frame. Widths and text scale with the zoom like the rest of the group.
pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_links(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	for link in state.link_segments() {
		ctx.set_stroke_style_str(&format!("rgba(204, 204, 204, {})", link.opacity));
		ctx.set_line_width(link.width);
		ctx.begin_path();
		ctx.move_to(link.x1, link.y1);
		ctx.line_to(link.x2, link.y2);
		ctx.stroke();
	}
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_font(LABEL_FONT);
	for node in state.node_sprites() {
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, node.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node.color);
		ctx.fill();
		ctx.set_stroke_style_str(NODE_STROKE);
		ctx.set_line_width(NODE_STROKE_WIDTH);
		ctx.stroke();

		ctx.set_fill_style_str(LABEL_COLOR);
		let _ = ctx.fill_text(node.label, node.x + LABEL_DX, node.y + LABEL_DY);
	}
}
