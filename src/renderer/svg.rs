//! DOM/SVG board renderer
//!
//! Pull-based: after every tick the app hands over the snake body and the
//! food, and the layers are redrawn from scratch.

use web_sys::{Document, Element};

use super::shapes::{cell_center, cell_rect, grid_lines, view_box};
use crate::BoardConfig;
use crate::settings::Skin;
use crate::sim::{ActiveEffects, Food, Point};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

pub struct SvgRenderer {
    document: Document,
    host: Element,
    svg: Element,
    foods: Element,
    snake: Element,
    config: BoardConfig,
}

impl SvgRenderer {
    /// Build the `<svg>` inside `host`. None if the DOM refuses.
    pub fn new(document: Document, host: Element, config: BoardConfig) -> Option<Self> {
        let svg = document.create_element_ns(Some(SVG_NS), "svg").ok()?;
        let grid = document.create_element_ns(Some(SVG_NS), "g").ok()?;
        let foods = document.create_element_ns(Some(SVG_NS), "g").ok()?;
        let snake = document.create_element_ns(Some(SVG_NS), "g").ok()?;

        grid.set_attribute("data-layer", "grid").ok()?;
        foods.set_attribute("data-layer", "foods").ok()?;
        snake.set_attribute("data-layer", "snake").ok()?;
        svg.append_child(&grid).ok()?;
        svg.append_child(&foods).ok()?;
        svg.append_child(&snake).ok()?;
        host.append_child(&svg).ok()?;

        let renderer = Self {
            document,
            host,
            svg,
            foods,
            snake,
            config,
        };
        renderer.layout(&grid);
        Some(renderer)
    }

    /// Size the svg and draw the static grid
    fn layout(&self, grid: &Element) {
        let BoardConfig {
            cols,
            rows,
            cell_size,
        } = self.config;
        let w = cols as u32 * cell_size;
        let h = rows as u32 * cell_size;

        let _ = self
            .svg
            .set_attribute("viewBox", &view_box(cols, rows, cell_size));
        let _ = self.svg.set_attribute("preserveAspectRatio", "xMidYMid meet");
        let _ = self.svg.set_attribute(
            "style",
            &format!(
                "border:1px solid #ccc;background:#fafafa;width:100%;height:auto;aspect-ratio:{} / {};display:block",
                w, h
            ),
        );

        grid.set_inner_html("");
        for line in grid_lines(cols, rows, cell_size) {
            if let Some(el) = self.create("line") {
                let _ = el.set_attribute("x1", &line.start.x.to_string());
                let _ = el.set_attribute("y1", &line.start.y.to_string());
                let _ = el.set_attribute("x2", &line.end.x.to_string());
                let _ = el.set_attribute("y2", &line.end.y.to_string());
                let _ = el.set_attribute("stroke", "#eee");
                let _ = el.set_attribute("stroke-width", "1");
                let _ = grid.append_child(&el);
            }
        }
    }

    fn create(&self, tag: &str) -> Option<Element> {
        self.document.create_element_ns(Some(SVG_NS), tag).ok()
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    /// Throw away the current svg and rebuild for a new board size
    pub fn resize(&mut self, config: BoardConfig) {
        self.svg.remove();
        if let Some(fresh) = Self::new(self.document.clone(), self.host.clone(), config) {
            *self = fresh;
        } else {
            log::warn!("Could not rebuild board svg");
        }
    }

    pub fn render_food(&self, food: Option<&Food>) {
        self.foods.set_inner_html("");
        let Some(food) = food else { return };
        let Some(el) = self.create("text") else { return };

        let center = cell_center(food.pos, self.config.cell_size);
        let _ = el.set_attribute("class", &format!("food food-{}", food.kind.as_str()));
        let _ = el.set_attribute("text-anchor", "middle");
        let _ = el.set_attribute("dominant-baseline", "middle");
        let _ = el.set_attribute(
            "font-size",
            &(self.config.cell_size as f32 * 0.9).to_string(),
        );
        let _ = el.set_attribute("x", &center.x.to_string());
        let _ = el.set_attribute("y", &center.y.to_string());
        el.set_text_content(Some(food.kind.emoji()));
        let _ = self.foods.append_child(&el);
    }

    pub fn render_snake(&self, body: &[Point], skin: Skin, effects: ActiveEffects) {
        self.snake.set_inner_html("");
        let stroke = if effects.shield {
            "#2196F3"
        } else {
            "rgba(0,0,0,0.15)"
        };

        for (i, p) in body.iter().enumerate() {
            let Some(el) = self.create("rect") else { continue };
            let r = cell_rect(*p, self.config.cell_size);
            let fill = if i == 0 {
                skin.head_color()
            } else {
                skin.body_color()
            };
            let _ = el.set_attribute("class", if i == 0 { "seg head" } else { "seg" });
            let _ = el.set_attribute("rx", "4");
            let _ = el.set_attribute("ry", "4");
            let _ = el.set_attribute("x", &r.x.to_string());
            let _ = el.set_attribute("y", &r.y.to_string());
            let _ = el.set_attribute("width", &r.width.to_string());
            let _ = el.set_attribute("height", &r.height.to_string());
            let _ = el.set_attribute("fill", fill);
            let _ = el.set_attribute("stroke", stroke);
            let _ = self.snake.append_child(&el);
        }
    }
}
