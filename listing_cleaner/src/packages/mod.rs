/// Arena backed HTML fragments.
pub mod fragment;
