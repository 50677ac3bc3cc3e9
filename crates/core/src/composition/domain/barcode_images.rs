use std::fmt;

use crate::shared::frame::Frame;

/// The fixed set of images produced for every video.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BarcodeKind {
    Columns,
    ColumnsBlurred,
    SolidColor,
}

impl BarcodeKind {
    pub const ALL: [BarcodeKind; 3] = [
        BarcodeKind::Columns,
        BarcodeKind::ColumnsBlurred,
        BarcodeKind::SolidColor,
    ];

    /// Text appended to the input file stem when naming the output file.
    pub fn postfix(self) -> &'static str {
        match self {
            BarcodeKind::Columns => "(Columns)",
            BarcodeKind::ColumnsBlurred => "(Blurred Columns)",
            BarcodeKind::SolidColor => "(Solid Color)",
        }
    }
}

impl fmt::Display for BarcodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BarcodeKind::Columns => "columns",
            BarcodeKind::ColumnsBlurred => "blurred columns",
            BarcodeKind::SolidColor => "solid color",
        };
        f.write_str(name)
    }
}

/// The three finished renderings of one video.
#[derive(Clone, Debug)]
pub struct BarcodeImages {
    columns: Frame,
    columns_blurred: Frame,
    solid_color: Frame,
}

impl BarcodeImages {
    pub fn new(columns: Frame, columns_blurred: Frame, solid_color: Frame) -> Self {
        Self {
            columns,
            columns_blurred,
            solid_color,
        }
    }

    pub fn get(&self, kind: BarcodeKind) -> &Frame {
        match kind {
            BarcodeKind::Columns => &self.columns,
            BarcodeKind::ColumnsBlurred => &self.columns_blurred,
            BarcodeKind::SolidColor => &self.solid_color,
        }
    }

    /// Iterates the images in `BarcodeKind::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (BarcodeKind, &Frame)> + '_ {
        BarcodeKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.get(kind)))
    }
}
