use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
	pub current_page: u32,
	pub total_pages: u64,
	pub total_items: u64,
	pub items_per_page: u32,
}

/// Cuts one page out of `items`.
///
/// `total_pages` is at least 1, and a page past the end is an empty slice. `page` and
/// `page_size` are validated upstream; zero is treated as 1 here.
pub fn paginate<T>(items: Vec<T>, page: u32, page_size: u32) -> (Vec<T>, Pagination) {
	let page = page.max(1);
	let page_size = page_size.max(1);
	let total_items = items.len() as u64;
	let total_pages = total_items.div_ceil(u64::from(page_size)).max(1);
	let start = (u64::from(page) - 1).saturating_mul(u64::from(page_size));
	let slice = match usize::try_from(start) {
		Ok(start) if start < items.len() =>
			items.into_iter().skip(start).take(page_size as usize).collect(),
		_ => Vec::new(),
	};

	(
		slice,
		Pagination { current_page: page, total_pages, total_items, items_per_page: page_size },
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn total_pages_is_at_least_one() {
		let (slice, meta) = paginate(Vec::<u32>::new(), 1, 20);

		assert!(slice.is_empty());
		assert_eq!(meta.total_pages, 1);
		assert_eq!(meta.total_items, 0);
	}

	#[test]
	fn total_pages_rounds_up() {
		let cases = [(10, 20, 1), (20, 20, 1), (21, 20, 2), (41, 20, 3), (7, 1, 7)];

		for (total, size, expected) in cases {
			let (_, meta) = paginate((0..total).collect::<Vec<u32>>(), 1, size);

			assert_eq!(meta.total_pages, expected, "total={total} size={size}");
		}
	}

	#[test]
	fn slices_the_requested_page() {
		let (slice, meta) = paginate((1..=45).collect::<Vec<u32>>(), 3, 20);

		assert_eq!(slice, (41..=45).collect::<Vec<u32>>());
		assert_eq!(meta.current_page, 3);
		assert_eq!(meta.items_per_page, 20);
	}

	#[test]
	fn page_past_the_end_is_empty() {
		let (slice, meta) = paginate((0..10).collect::<Vec<u32>>(), 5, 20);

		assert!(slice.is_empty());
		assert_eq!(meta.current_page, 5);
		assert_eq!(meta.total_pages, 1);
		assert_eq!(meta.total_items, 10);
	}

	#[test]
	fn huge_pages_do_not_overflow() {
		let (slice, meta) = paginate(vec![1_u8, 2, 3], u32::MAX, u32::MAX);

		assert!(slice.is_empty());
		assert_eq!(meta.total_pages, 1);
	}
}
