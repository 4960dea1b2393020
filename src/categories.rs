// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Static display table for categories.

use crate::models::Category;

pub const FALLBACK_COLOR: &str = "#78716c";

pub fn color(category: Category) -> &'static str {
    match category {
        Category::Housing => "#ef4444",
        Category::Transportation => "#f97316",
        Category::Food => "#84cc16",
        Category::Utilities => "#3b82f6",
        Category::Insurance => "#8b5cf6",
        Category::Healthcare => "#ec4899",
        Category::Entertainment => "#f43f5e",
        Category::Shopping => "#06b6d4",
        Category::Personal => "#14b8a6",
        Category::Education => "#a855f7",
        Category::Travel => "#0ea5e9",
        Category::Investments => "#22c55e",
        Category::Income => "#22c55e",
        Category::Other => FALLBACK_COLOR,
    }
}

/// (name, color) rows in display order.
pub fn table() -> Vec<(Category, &'static str)> {
    Category::ALL.into_iter().map(|c| (c, color(c))).collect()
}
