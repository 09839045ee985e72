use crate::data::SkillAmount;
use std::f64::consts::PI;
use yew::prelude::*;

const CENTER: f64 = 150.0;
const RADIUS: f64 = 100.0;
const LABEL_OFFSET: f64 = 30.0;
const RINGS: [f64; 5] = [0.2, 0.4, 0.6, 0.8, 1.0];

/// Axis `index` of `count`, starting straight up and going clockwise.
pub fn axis_angle(index: usize, count: usize) -> f64 {
	(PI * 2.0 * index as f64) / count as f64 - PI / 2.0
}

fn on_axis(index: usize, count: usize, distance: f64) -> (f64, f64) {
	let angle = axis_angle(index, count);
	(CENTER + distance * angle.cos(), CENTER + distance * angle.sin())
}

/// Polygon vertices, each skill scaled against the strongest one.
pub fn radar_points(skills: &[SkillAmount]) -> Vec<(f64, f64)> {
	let max = skills.iter().map(|skill| skill.amount).max().unwrap_or_default();
	skills
		.iter()
		.enumerate()
		.map(|(index, skill)| {
			let share = match max > 0 {
				true => skill.amount.max(0) as f64 / max as f64,
				false => 0.0,
			};
			on_axis(index, skills.len(), RADIUS * share)
		})
		.collect()
}

#[derive(Properties, PartialEq)]
pub struct SkillsGraphProps {
	pub skills: Vec<SkillAmount>,
}

#[function_component]
pub fn SkillsGraph(SkillsGraphProps { skills }: &SkillsGraphProps) -> Html {
	if skills.is_empty() {
		return html! {
			<div class="box skills">
				<h3 class="title is-5">{"Best skills"}</h3>
				<p>{"No skills recorded yet."}</p>
			</div>
		};
	}
	let count = skills.len();
	let points = radar_points(skills)
		.into_iter()
		.map(|(x, y)| format!("{x:.2},{y:.2}"))
		.collect::<Vec<_>>()
		.join(" ");
	let rings = RINGS.iter().map(|share| {
		html! {
			<circle cx={CENTER.to_string()} cy={CENTER.to_string()} r={format!("{:.1}", RADIUS * share)}
				fill="none" stroke="#444" stroke-width="1" />
		}
	});
	let axes = skills.iter().enumerate().map(|(index, skill)| {
		let (x, y) = on_axis(index, count, RADIUS);
		let (label_x, label_y) = on_axis(index, count, RADIUS + LABEL_OFFSET);
		html! {
			<g key={skill.key.clone()}>
				<line x1={CENTER.to_string()} y1={CENTER.to_string()} x2={format!("{x:.2}")} y2={format!("{y:.2}")}
					stroke="#444" stroke-width="1" />
				<text x={format!("{label_x:.2}")} y={format!("{label_y:.2}")} text-anchor="middle"
					dominant-baseline="middle" font-size="12">
					<title>{format!("{}: {}", skill.label, skill.amount)}</title>
					{skill.label.clone()}
				</text>
			</g>
		}
	});
	html! {
		<div class="box skills">
			<h3 class="title is-5">{"Best skills"}</h3>
			<svg width="100%" viewBox="-40 0 380 300" role="img">
				{for rings}
				{for axes}
				<polygon points={points} fill="rgba(149, 128, 255, 0.5)" stroke="#9580ff" stroke-width="2" />
			</svg>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn skill(key: &str, amount: i64) -> SkillAmount {
		SkillAmount {
			key: key.into(),
			label: key.into(),
			amount,
		}
	}

	fn close(a: (f64, f64), b: (f64, f64)) -> bool {
		(a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
	}

	#[test]
	fn first_axis_points_up() {
		assert!((axis_angle(0, 6) + PI / 2.0).abs() < 1e-12);
	}

	#[test]
	fn strongest_skill_reaches_the_rim() {
		let points = radar_points(&[skill("go", 50), skill("js", 25), skill("c", 50), skill("sql", 0)]);
		assert!(close(points[0], (150.0, 50.0)));
		assert!(close(points[1], (200.0, 150.0)));
		assert!(close(points[2], (150.0, 250.0)));
		assert!(close(points[3], (150.0, 150.0)));
	}

	#[test]
	fn all_zero_collapses_to_center() {
		let points = radar_points(&[skill("go", 0), skill("js", 0)]);
		assert!(points.iter().all(|point| close(*point, (CENTER, CENTER))));
	}
}
