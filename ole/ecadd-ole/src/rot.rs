//! Random OLE with errors from random OT.
//!
//! Both parties can preprocess random OLEs ahead of time with `preprocess`. Subsequent calls take
//! from the preprocessed buffer first and generate any shortfall on demand. Both parties must
//! preprocess the same counts so that their buffers stay aligned.

use async_trait::async_trait;
use ecadd_common::Context;
use ecadd_core::Block;
use ecadd_fields::Field;
use ecadd_ole_core::role::{rot_count, ROLEeEvaluator, ROLEeProvider};
use ecadd_ot::{OTError, OTSetup, RandomOTReceiver, RandomOTSender};
use serio::{stream::IoStreamExt, SinkExt};
use tracing::trace;

use crate::{msg::ROLEMessage, OLEError, RandomOLEEvaluate, RandomOLEProvide};

/// Buffer of preprocessed random OLEs.
#[derive(Debug)]
struct Buffer<F> {
    inputs: Vec<F>,
    outputs: Vec<F>,
}

impl<F> Default for Buffer<F> {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }
}

impl<F> Buffer<F> {
    fn available(&self) -> usize {
        self.inputs.len()
    }

    fn extend(&mut self, inputs: Vec<F>, outputs: Vec<F>) {
        self.inputs.extend(inputs);
        self.outputs.extend(outputs);
    }

    /// Takes up to `count` random OLEs from the front of the buffer.
    fn take(&mut self, count: usize) -> (Vec<F>, Vec<F>) {
        let count = count.min(self.available());

        let inputs = self.inputs.drain(..count).collect();
        let outputs = self.outputs.drain(..count).collect();

        (inputs, outputs)
    }
}

/// A provider for ROLEe.
#[derive(Debug)]
pub struct ROLEProvider<T, F> {
    rot_sender: T,
    core: ROLEeProvider<F>,
    buffer: Buffer<F>,
}

impl<T, F: Field> ROLEProvider<T, F> {
    /// Creates a new [`ROLEProvider`].
    pub fn new(rot_sender: T) -> Self {
        Self {
            rot_sender,
            core: ROLEeProvider::default(),
            buffer: Buffer::default(),
        }
    }

    /// Returns the number of preprocessed random OLEs.
    pub fn available(&self) -> usize {
        self.buffer.available()
    }

    /// Preprocesses `count` random OLEs.
    pub async fn preprocess<Ctx>(&mut self, ctx: &mut Ctx, count: usize) -> Result<(), OLEError>
    where
        Ctx: Context,
        T: RandomOTSender<Ctx, [Block; 2]> + Send,
    {
        let (ak, xk) = self.generate(ctx, count).await?;
        self.buffer.extend(ak, xk);

        Ok(())
    }

    async fn generate<Ctx>(
        &mut self,
        ctx: &mut Ctx,
        count: usize,
    ) -> Result<(Vec<F>, Vec<F>), OLEError>
    where
        Ctx: Context,
        T: RandomOTSender<Ctx, [Block; 2]> + Send,
    {
        let n = rot_count::<F>(count);
        trace!(count = n, "sending random OTs");

        let ti01 = self.rot_sender.send_random(ctx, n).await?;
        if ti01.len() != n {
            return Err(OTError::CountMismatch {
                expected: n,
                actual: ti01.len(),
            }
            .into());
        }

        let (ck, ek) = self.core.sample_c_and_e(count);
        let (ui, t0i) = self.core.create_correlation(&ti01, &ck)?;

        let io = ctx.io_mut();
        io.send(ROLEMessage::Correlation(ui, ek.clone())).await?;
        let dk = io
            .expect_next::<ROLEMessage<F>>()
            .await?
            .try_into_evaluator_input()?;

        Ok(self.core.generate_output(&t0i, &ck, &dk, &ek)?)
    }
}

#[async_trait]
impl<Ctx, T, F> RandomOLEProvide<Ctx, F> for ROLEProvider<T, F>
where
    Ctx: Context,
    T: OTSetup<Ctx> + RandomOTSender<Ctx, [Block; 2]> + Send,
    F: Field,
{
    async fn setup(&mut self, ctx: &mut Ctx) -> Result<(), OLEError> {
        self.rot_sender.setup(ctx).await?;
        Ok(())
    }

    async fn provide_random(
        &mut self,
        ctx: &mut Ctx,
        count: usize,
    ) -> Result<(Vec<F>, Vec<F>), OLEError> {
        let (mut ak, mut xk) = self.buffer.take(count);
        let shortfall = count - ak.len();
        if shortfall == 0 {
            return Ok((ak, xk));
        }

        let (gen_ak, gen_xk) = self.generate(ctx, shortfall).await?;
        ak.extend(gen_ak);
        xk.extend(gen_xk);

        Ok((ak, xk))
    }
}

/// An evaluator for ROLEe.
#[derive(Debug)]
pub struct ROLEEvaluator<T, F> {
    rot_receiver: T,
    core: ROLEeEvaluator<F>,
    buffer: Buffer<F>,
}

impl<T, F: Field> ROLEEvaluator<T, F> {
    /// Creates a new [`ROLEEvaluator`].
    pub fn new(rot_receiver: T) -> Self {
        Self {
            rot_receiver,
            core: ROLEeEvaluator::default(),
            buffer: Buffer::default(),
        }
    }

    /// Returns the number of preprocessed random OLEs.
    pub fn available(&self) -> usize {
        self.buffer.available()
    }

    /// Preprocesses `count` random OLEs.
    pub async fn preprocess<Ctx>(&mut self, ctx: &mut Ctx, count: usize) -> Result<(), OLEError>
    where
        Ctx: Context,
        T: RandomOTReceiver<Ctx, bool, Block> + Send,
    {
        let (bk, yk) = self.generate(ctx, count).await?;
        self.buffer.extend(bk, yk);

        Ok(())
    }

    async fn generate<Ctx>(
        &mut self,
        ctx: &mut Ctx,
        count: usize,
    ) -> Result<(Vec<F>, Vec<F>), OLEError>
    where
        Ctx: Context,
        T: RandomOTReceiver<Ctx, bool, Block> + Send,
    {
        let n = rot_count::<F>(count);
        trace!(count = n, "receiving random OTs");

        let (fi, tfi) = self.rot_receiver.receive_random(ctx, n).await?;
        if let Some(actual) = [fi.len(), tfi.len()].into_iter().find(|&len| len != n) {
            return Err(OTError::CountMismatch {
                expected: n,
                actual,
            }
            .into());
        }

        let dk = self.core.sample_d(count);

        let io = ctx.io_mut();
        let (ui, ek) = io
            .expect_next::<ROLEMessage<F>>()
            .await?
            .try_into_correlation()?;
        io.send(ROLEMessage::EvaluatorInput(dk.clone())).await?;

        Ok(self.core.generate_output(&fi, &tfi, &ui, &dk, &ek)?)
    }
}

#[async_trait]
impl<Ctx, T, F> RandomOLEEvaluate<Ctx, F> for ROLEEvaluator<T, F>
where
    Ctx: Context,
    T: OTSetup<Ctx> + RandomOTReceiver<Ctx, bool, Block> + Send,
    F: Field,
{
    async fn setup(&mut self, ctx: &mut Ctx) -> Result<(), OLEError> {
        self.rot_receiver.setup(ctx).await?;
        Ok(())
    }

    async fn evaluate_random(
        &mut self,
        ctx: &mut Ctx,
        count: usize,
    ) -> Result<(Vec<F>, Vec<F>), OLEError> {
        let (mut bk, mut yk) = self.buffer.take(count);
        let shortfall = count - bk.len();
        if shortfall == 0 {
            return Ok((bk, yk));
        }

        let (gen_bk, gen_yk) = self.generate(ctx, shortfall).await?;
        bk.extend(gen_bk);
        yk.extend(gen_yk);

        Ok((bk, yk))
    }
}
