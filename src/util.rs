#[macro_export]
macro_rules! ok_or_continue {
    ( $e:expr ) => {
        match $e {
            Ok(value) => value,
            Err(_e) => {
                continue;
            }
        }
    };
}

/// A fixed-size 2d array, stored row by row. `x` addresses the column and `y` the row.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Array2d<T> {
    width: usize,
    height: usize,
    vec: Vec<T>,
}

impl<T: Default + Clone> Array2d<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            vec: vec![T::default(); width * height],
        }
    }
}

impl<T> Array2d<T> {
    /// Build an array from a list of rows. Every row must have the same length.
    ///
    /// ```
    /// # use moundboard::util::Array2d;
    /// let bitmap = Array2d::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]);
    /// assert_eq!(bitmap.width(), 3);
    /// assert_eq!(bitmap.height(), 2);
    /// assert_eq!(bitmap[(2, 1)], 6);
    /// ```
    pub fn from_rows(rows: Vec<Vec<T>>) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());

        let mut vec = Vec::with_capacity(width * height);
        for row in rows {
            assert_eq!(row.len(), width, "All rows of an Array2d must have the same length");
            vec.extend(row);
        }

        Self { width, height, vec }
    }

    /// Build an array by evaluating `f(x, y)` for every cell
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut vec = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                vec.push(f(x, y));
            }
        }

        Self { width, height, vec }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x < self.width && y < self.height {
            Some(&self.vec[y * self.width + x])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if x < self.width && y < self.height {
            Some(&mut self.vec[y * self.width + x])
        } else {
            None
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
}

impl<T> std::ops::Index<(usize, usize)> for Array2d<T> {
    type Output = T;

    fn index(&self, (x, y): (usize, usize)) -> &T {
        assert!(x < self.width, "x coordinate {} out of bounds", x);
        assert!(y < self.height, "y coordinate {} out of bounds", y);

        &self.vec[y * self.width + x]
    }
}

impl<T> std::ops::IndexMut<(usize, usize)> for Array2d<T> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        assert!(x < self.width, "x coordinate {} out of bounds", x);
        assert!(y < self.height, "y coordinate {} out of bounds", y);

        &mut self.vec[y * self.width + x]
    }
}
