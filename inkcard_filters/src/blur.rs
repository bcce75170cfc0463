// Copyright 2026 the Inkcard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Box blur averaging over in-bounds neighbours only.
//!
//! The square window is separable: the sum over a clipped rectangle is the
//! vertical sum of horizontal row sums. Both passes keep a sliding running
//! sum, so cost does not depend on the radius.

/// Blurs `pixels` in place with a `(2 * radius + 1)²` window.
///
/// Pixels near the edge average over the smaller window that fits inside
/// the image; there is no wraparound and no edge replication.
pub(crate) fn box_blur(pixels: &mut [u8], width: usize, height: usize, radius: usize) {
    if width == 0 || height == 0 || radius == 0 {
        return;
    }
    let row_sums = horizontal_sums(pixels, width, height, radius);

    let mut acc = vec![[0_u32; 4]; width];
    // Prime with rows 0..=radius.
    for y in 0..=radius.min(height - 1) {
        add_row(&mut acc, &row_sums[y * width..][..width]);
    }
    for y in 0..height {
        let rows = span(y, radius, height);
        for (x, sum) in acc.iter().enumerate() {
            let count = rows * span(x, radius, width);
            let out = &mut pixels[(y * width + x) * 4..][..4];
            for (dst, s) in out.iter_mut().zip(sum) {
                *dst = div_round(*s, count);
            }
        }
        if y + radius + 1 < height {
            add_row(&mut acc, &row_sums[(y + radius + 1) * width..][..width]);
        }
        if y >= radius {
            sub_row(&mut acc, &row_sums[(y - radius) * width..][..width]);
        }
    }
}

/// Per-pixel sums of the horizontal window, four channels each.
fn horizontal_sums(pixels: &[u8], width: usize, height: usize, radius: usize) -> Vec<[u32; 4]> {
    let mut sums = vec![[0_u32; 4]; width * height];
    for y in 0..height {
        let row = &pixels[y * width * 4..(y + 1) * width * 4];
        let px = |x: usize| {
            let p = &row[x * 4..x * 4 + 4];
            [p[0], p[1], p[2], p[3]].map(u32::from)
        };
        let mut acc = [0_u32; 4];
        for x in 0..=radius.min(width - 1) {
            add(&mut acc, px(x));
        }
        for x in 0..width {
            sums[y * width + x] = acc;
            if x + radius + 1 < width {
                add(&mut acc, px(x + radius + 1));
            }
            if x >= radius {
                sub(&mut acc, px(x - radius));
            }
        }
    }
    sums
}

/// Number of in-bounds indices in `i - radius..=i + radius` within `0..len`.
fn span(i: usize, radius: usize, len: usize) -> usize {
    (i + radius).min(len - 1) - i.saturating_sub(radius) + 1
}

fn add_row(acc: &mut [[u32; 4]], row: &[[u32; 4]]) {
    for (a, s) in acc.iter_mut().zip(row) {
        add(a, *s);
    }
}

fn sub_row(acc: &mut [[u32; 4]], row: &[[u32; 4]]) {
    for (a, s) in acc.iter_mut().zip(row) {
        sub(a, *s);
    }
}

fn add(acc: &mut [u32; 4], v: [u32; 4]) {
    for (a, v) in acc.iter_mut().zip(v) {
        *a += v;
    }
}

fn sub(acc: &mut [u32; 4], v: [u32; 4]) {
    for (a, v) in acc.iter_mut().zip(v) {
        *a -= v;
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "an average of u8 values fits in u8"
)]
fn div_round(sum: u32, count: usize) -> u8 {
    let count = count as u32;
    ((sum + count / 2) / count) as u8
}
