//! moneyboard-core: pure data shaping behind the monthly spending ring and
//! the trailing expense trend.

pub mod category;
pub mod chart;
pub mod error;
pub mod format;
pub mod panel;
pub mod trend;
pub mod window;

pub use category::{
    compute_totals, AugmentedCategoryRecord, CategoryRecord, CategorySummary, CategoryTotals,
    Palette, AMOUNT_LEFT,
};
pub use chart::{AreaSeries, CategoryView, HeaderLabels, ProgressIndicator, RingSegment};
pub use error::{ShapeError, ShapeResult};
pub use panel::{Applied, Panel, PanelState, RefreshTicket};
pub use trend::{compress, compress_response, CompressedPoint, PricePoint};
pub use window::{local_today, DateWindow, MonthQuery, DEFAULT_WINDOW_DAYS};
