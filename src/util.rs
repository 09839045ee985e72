pub mod date;
pub mod lenient;

/// Runs `future` on the browser's event loop; a failure is logged under
/// `target` and otherwise dropped.
pub fn spawn_local<F, E>(target: &'static str, future: F)
where
	F: std::future::Future<Output = Result<(), E>> + 'static,
	E: std::fmt::Display + 'static,
{
	wasm_bindgen_futures::spawn_local(async move {
		if let Err(err) = future.await {
			log::warn!(target: target, "{err}");
		}
	});
}
