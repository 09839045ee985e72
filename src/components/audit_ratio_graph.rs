use crate::data::AuditRatio;
use yew::prelude::*;

/// Tallest bar, in svg units.
pub const BAR_AREA: f64 = 200.0;

/// Bar heights for (done, received), scaled so the larger fills [`BAR_AREA`].
pub fn bar_heights(ratio: &AuditRatio) -> (f64, f64) {
	let (up, down) = (ratio.up_mb(), ratio.down_mb());
	let max = up.max(down);
	if max <= 0.0 {
		return (0.0, 0.0);
	}
	(up / max * BAR_AREA, down / max * BAR_AREA)
}

#[derive(Properties, PartialEq)]
pub struct AuditRatioGraphProps {
	pub ratio: AuditRatio,
}

#[function_component]
pub fn AuditRatioGraph(AuditRatioGraphProps { ratio }: &AuditRatioGraphProps) -> Html {
	let (up_height, down_height) = bar_heights(ratio);
	let bar = |offset: &'static str, height: f64, fill: &'static str, caption: &'static str, value: String| {
		html! {
			<g transform={format!("translate({offset}, 250)")}>
				<rect x="0" y={format!("{:.2}", -height)} width="40" height={format!("{height:.2}")} fill={fill} />
				<text x="20" y="20" text-anchor="middle" fill="#888">{caption}</text>
				<text x="20" y={format!("{:.2}", -height - 10.0)} text-anchor="middle" fill={fill}>{value}</text>
			</g>
		}
	};
	html! {
		<div class="box audit-ratio">
			<h3 class="title is-5">{"Audits ratio"}</h3>
			<svg width="100%" viewBox="0 0 400 300" role="img">
				{bar("100", up_height, "#FFD700", "Done", format!("{:.2} MB ↑", ratio.up_mb()))}
				{bar("200", down_height, "#9A9A9A", "Received", format!("{:.2} MB ↓", ratio.down_mb()))}
				<g transform="translate(300, 250)">
					<text x="0" y="-20" font-size="32" font-weight="bold" fill="#FFD700">{ratio.display_ratio()}</text>
					<text x="0" y="20" font-size="14" fill="#888">{ratio.verdict()}</text>
				</g>
			</svg>
		</div>
	}
}
