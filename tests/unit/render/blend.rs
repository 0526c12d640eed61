use super::*;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src), dst);
    assert_eq!(over_straight(dst, src), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src), src);
    assert_eq!(over_straight(dst, src), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src), src);
}

#[test]
fn half_transparent_red_over_opaque_white() {
    let out = over_straight([255, 255, 255, 255], [255, 0, 0, 128]);
    assert_eq!(out[3], 255);
    assert_eq!(out[0], 255);
    assert!((126..=128).contains(&out[1]));
    assert_eq!(out[1], out[2]);
}
