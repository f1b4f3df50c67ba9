//! In-place rotation of two adjacent runs of argument slots.

/// Swap the runs `argv[bottom..middle]` and `argv[middle..top]` so that the
/// second run ends up first, each keeping its internal order.
///
/// Works by repeatedly swapping the shorter run with the far end of the
/// longer one. Only slots move; nothing is allocated.
pub fn exchange<T>(argv: &mut [T], bottom: usize, middle: usize, top: usize) {
    debug_assert!(bottom <= middle && middle <= top && top <= argv.len());

    let mut bottom = bottom;
    let mut top = top;
    while top > middle && middle > bottom {
        if top - middle > middle - bottom {
            // Bottom run is shorter: park it at the top.
            let len = middle - bottom;
            for i in 0..len {
                argv.swap(bottom + i, top - len + i);
            }
            top -= len;
        } else {
            // Top run is shorter: park it at the bottom.
            let len = top - middle;
            for i in 0..len {
                argv.swap(bottom + i, middle + i);
            }
            bottom += len;
        }
    }
}
