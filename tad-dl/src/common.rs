pub use anyhow::{bail, ensure, format_err, Context as _, Error, Result};
pub use indexmap::IndexSet;
pub use itertools::{izip, Itertools as _};
pub use log::{info, warn};
pub use noisy_float::prelude::*;
pub use serde::{Deserialize, Serialize};
pub use std::{
    cmp::Ordering,
    collections::HashMap,
    fmt,
    fmt::Debug,
    future::Future,
    io,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    pin::Pin,
    sync::Arc,
};
pub use tch::{IndexOp, Kind, Tensor};
pub use tch_tensor_like::TensorLike;
