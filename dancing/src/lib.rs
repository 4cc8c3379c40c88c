//! Exact-cover solving with Knuth's dancing links.

pub mod x;

pub use x::Matrix;

pub type Link = usize;
pub type Count = Link;
pub type Data = isize;

const _: () = {
    assert!(Link::MAX as u128 <= u64::MAX as u128);
    assert!(Data::MAX as u128 <= Link::MAX as u128);
    assert!(Data::MIN < 0);
};
