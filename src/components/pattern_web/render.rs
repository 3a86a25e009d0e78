use std::f64::consts::FRAC_PI_2;

use web_sys::CanvasRenderingContext2d;

use super::path::ARROW_SHAPE;
use super::state::PatternWebState;

#[derive(Clone, Copy)]
struct Rgb(f64, f64, f64);

const BACKGROUND: &str = "#ffffff";
const EDGE: Rgb = Rgb(209.0, 213.0, 219.0);
const EDGE_EMPHASIS: Rgb = Rgb(59.0, 130.0, 246.0);
const NODE_FILL: Rgb = Rgb(255.0, 255.0, 255.0);
const NODE_BORDER: Rgb = Rgb(229.0, 229.0, 229.0);
const HOVER_FILL: Rgb = Rgb(245.0, 245.0, 245.0);
const HOVER_BORDER: Rgb = Rgb(147.0, 197.0, 253.0);
const SELECTED_FILL: Rgb = Rgb(219.0, 234.0, 254.0);
const SELECTED_BORDER: Rgb = Rgb(59.0, 130.0, 246.0);
const LABEL_COLOR: &str = "#262626";
const LABEL_FONT: &str = "500 14px sans-serif";
const NODE_CORNER_RADIUS: f64 = 8.0;

fn mix(a: Rgb, b: Rgb, t: f64) -> Rgb {
	Rgb(
		a.0 + (b.0 - a.0) * t,
		a.1 + (b.1 - a.1) * t,
		a.2 + (b.2 - a.2) * t,
	)
}

fn rgba(c: Rgb, alpha: f64) -> String {
	format!(
		"rgba({}, {}, {}, {})",
		c.0.round(),
		c.1.round(),
		c.2.round(),
		alpha
	)
}

pub fn render(state: &PatternWebState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
}

fn draw_edges(state: &PatternWebState, ctx: &CanvasRenderingContext2d) {
	for (i, edge) in state.edges().iter().enumerate() {
		let path = &edge.path;
		if path.length() < 0.001 {
			continue;
		}

		let t = state.edge_emphasis(i);
		let color = mix(EDGE, EDGE_EMPHASIS, t);
		let alpha = 0.5 + 0.3 * t;

		ctx.set_stroke_style_str(&rgba(color, alpha));
		ctx.set_line_width(1.0 + t);
		ctx.begin_path();
		ctx.move_to(path.start.x, path.start.y);
		ctx.quadratic_curve_to(path.control.x, path.control.y, path.end.x, path.end.y);
		ctx.stroke();

		if !state.options.arrows {
			continue;
		}
		let arrow = path.arrow();
		ctx.save();
		let _ = ctx.translate(arrow.origin.x, arrow.origin.y);
		let _ = ctx.rotate(arrow.angle);
		ctx.set_fill_style_str(&rgba(color, alpha));
		ctx.begin_path();
		let [first, rest @ ..] = ARROW_SHAPE;
		ctx.move_to(first.x, first.y);
		for v in rest {
			ctx.line_to(v.x, v.y);
		}
		ctx.close_path();
		ctx.fill();
		ctx.restore();
	}
}

fn draw_nodes(state: &PatternWebState, ctx: &CanvasRenderingContext2d) {
	ctx.set_font(LABEL_FONT);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	for i in state.draw_order() {
		let node = &state.nodes()[i];
		let t = state.node_emphasis(&node.id);
		let (fill, border, border_width) = if state.interaction.is_selected(&node.id) {
			(
				mix(NODE_FILL, SELECTED_FILL, t),
				mix(NODE_BORDER, SELECTED_BORDER, t),
				1.0 + t,
			)
		} else {
			(
				mix(NODE_FILL, HOVER_FILL, t),
				mix(NODE_BORDER, HOVER_BORDER, t),
				1.0,
			)
		};

		let (x, y) = (
			node.position.x - node.width / 2.0,
			node.position.y - node.height / 2.0,
		);
		rounded_rect(ctx, x, y, node.width, node.height, NODE_CORNER_RADIUS);
		ctx.set_fill_style_str(&rgba(fill, 1.0));
		ctx.fill();
		ctx.set_stroke_style_str(&rgba(border, 1.0));
		ctx.set_line_width(border_width);
		ctx.stroke();

		ctx.set_fill_style_str(LABEL_COLOR);
		let _ = ctx.fill_text(&node.label, node.position.x, node.position.y);
	}
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	let r = r.min(w / 2.0).min(h / 2.0);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	ctx.line_to(x + w - r, y);
	let _ = ctx.arc(x + w - r, y + r, r, -FRAC_PI_2, 0.0);
	ctx.line_to(x + w, y + h - r);
	let _ = ctx.arc(x + w - r, y + h - r, r, 0.0, FRAC_PI_2);
	ctx.line_to(x + r, y + h);
	let _ = ctx.arc(x + r, y + h - r, r, FRAC_PI_2, 2.0 * FRAC_PI_2);
	ctx.line_to(x, y + r);
	let _ = ctx.arc(x + r, y + r, r, 2.0 * FRAC_PI_2, 3.0 * FRAC_PI_2);
	ctx.close_path();
}
